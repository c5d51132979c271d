//! One frame rendered to a file instead of a window

use std::io::Write;
use std::sync::Arc;

use tracing::info;
use wireplot::backend::svg::to_svg;
use wireplot::backend::FrameRecorder;
use wireplot::options::JsonOptionFile;
use wireplot::plotter::Plotter;

use crate::config::{Config, Format};
use crate::error::CliError;

/// Draw the configured plot at the configured size and encode it.
pub fn render(config: &Config) -> Result<String, CliError> {
    let path = config.data.as_ref().ok_or(CliError::MissingData)?;

    let mut plotter = Plotter::new(Arc::new(JsonOptionFile::new(&config.options)));
    plotter.set(path).map_err(|report| CliError::Load {
        path: path.clone(),
        report,
    })?;

    let mut recorder = FrameRecorder::new();
    plotter.resize(config.width, config.height, &mut recorder);
    let frame = recorder.take();
    info!("rendered {} segments", frame.segments().len());

    Ok(match config.format {
        Format::Json => serde_json::to_string_pretty(&frame)?,
        Format::Svg => to_svg(&frame, config.width, config.height),
    })
}

/// Render and write to `--out`, or stdout.
pub fn run(config: &Config) -> Result<(), CliError> {
    let body = render(config)?;
    match &config.out {
        Some(path) => {
            std::fs::write(path, body)?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wireplot-cli-{}-{name}", std::process::id()))
    }

    fn config(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("wireplot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn renders_svg_and_json() {
        let data = scratch("grid.txt");
        std::fs::write(&data, "0 1\n2 3\n").unwrap();
        let data_arg = data.to_string_lossy().into_owned();

        let svg = render(&config(&["--headless", "--options", "/nonexistent.json", &data_arg])).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("stroke-dasharray"));

        let json = render(&config(&[
            "--headless", "--format", "json", "--width", "800", "--height", "600", "--options",
            "/nonexistent.json", &data_arg,
        ]))
        .unwrap();
        let frame: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(frame["setup"]["viewport"]["size"], 600);
        assert_eq!(frame["setup"]["viewport"]["x"], 100);

        std::fs::remove_file(&data).unwrap();
    }

    #[test]
    fn writes_output_file() {
        let data = scratch("out-grid.txt");
        let out = scratch("frame.svg");
        std::fs::write(&data, "1 2 3\n4 5 6\n").unwrap();

        let config = config(&[
            "--headless",
            "--out",
            &out.to_string_lossy(),
            &data.to_string_lossy(),
        ]);
        run(&config).unwrap();
        assert!(std::fs::read_to_string(&out).unwrap().ends_with("</svg>"));

        std::fs::remove_file(&data).unwrap();
        std::fs::remove_file(&out).unwrap();
    }

    #[test]
    fn missing_or_bad_data_fails() {
        let err = render(&config(&["--headless"])).unwrap_err();
        assert_eq!(err.category(), "usage");

        let err = render(&config(&["--headless", "/nonexistent/grid.txt"])).unwrap_err();
        assert_eq!(err.category(), "file");
        assert!(err.to_string().starts_with("could not load /nonexistent/grid.txt"));
    }
}
