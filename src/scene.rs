//! Axis → Tics → Tics chains and the Grid → Grid chains that pair them.

use glam::{DMat4, DVec4};

use crate::backend::{Backend, draw_line, draw_parallel_lines};
use crate::core::Stroke;
use crate::math::{X_UNIT, Y_UNIT, Z_UNIT, ZERO};
use crate::options::Options;

/// Tic line lengths, as fractions of the tic direction.
pub const MAJOR_TIC: f64 = 0.04;
pub const MINOR_TIC: f64 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisId {
    X,
    Y,
    Z,
}

impl AxisId {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn direction(self) -> DVec4 {
        match self {
            Self::X => X_UNIT,
            Self::Y => Y_UNIT,
            Self::Z => Z_UNIT * 0.5,
        }
    }

    /// Direction tic marks point in.
    pub fn tics_direction(self) -> DVec4 {
        match self {
            Self::X | Self::Y => -Z_UNIT,
            Self::Z => -X_UNIT,
        }
    }
}

/// One subdivision level of an axis.
#[derive(Clone, Debug)]
pub struct Tics {
    options: Options,
    line: DVec4,
}

impl Tics {
    pub fn new(options: Options, line: DVec4) -> Self {
        Self { options, line }
    }

    /// `divisionNumber`, at least 1.
    pub fn division(&self) -> usize {
        self.options.get("divisionNumber").max(1) as usize
    }

    pub fn line(&self) -> DVec4 {
        self.line
    }
}

/// An axis with its major and minor tics.
#[derive(Clone, Debug)]
pub struct AxisChain {
    id: AxisId,
    options: Options,
    direction: DVec4,
    tics: [Tics; 2],
}

impl AxisChain {
    /// Build the chain for `id`, reading the `<id>Axis`, `<id>Tics` and `<id>MTics` sections of
    /// `options`' store.
    pub fn new(options: &Options, id: AxisId) -> Self {
        let name = id.name();
        let tics_direction = id.tics_direction();

        Self {
            id,
            options: options.section(format!("{name}Axis")),
            direction: id.direction(),
            tics: [
                Tics::new(
                    options.section(format!("{name}Tics")),
                    tics_direction * MAJOR_TIC,
                ),
                Tics::new(
                    options.section(format!("{name}MTics")),
                    tics_direction * MINOR_TIC,
                ),
            ],
        }
    }

    pub fn id(&self) -> AxisId {
        self.id
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn tics(&self) -> &[Tics; 2] {
        &self.tics
    }

    pub fn subject(&self) -> Subject<'_> {
        Subject::Axis(self)
    }

    /// Tics at `level` (0 = major), or [`Subject::Tail`] past the last level.
    pub fn tics_subject(&self, level: usize) -> Subject<'_> {
        if level < self.tics.len() {
            Subject::Tics(self, level)
        } else {
            Subject::Tail
        }
    }

    /// Draw the axis, then each tics level, with the same matrix.
    pub fn draw(&self, affine: &DMat4, backend: &mut dyn Backend) {
        let mut node = self.subject();
        while !node.is_tail() {
            node.draw(affine, backend);
            node = node.child();
        }
    }
}

/// A node of an axis chain, as seen by its neighbours and by grids.
#[derive(Clone, Copy, Debug)]
pub enum Subject<'a> {
    Axis(&'a AxisChain),
    Tics(&'a AxisChain, usize),
    /// Past the end of a chain: no intervals, no direction, no positions.
    Tail,
}

impl<'a> Subject<'a> {
    pub fn is_tail(self) -> bool {
        matches!(self, Self::Tail)
    }

    pub fn parent(self) -> Subject<'a> {
        match self {
            Self::Tics(chain, 0) => Self::Axis(chain),
            Self::Tics(chain, level) => Self::Tics(chain, level - 1),
            Self::Axis(_) | Self::Tail => Self::Tail,
        }
    }

    pub fn child(self) -> Subject<'a> {
        match self {
            Self::Axis(chain) => chain.tics_subject(0),
            Self::Tics(chain, level) => chain.tics_subject(level + 1),
            Self::Tail => Self::Tail,
        }
    }

    /// Factor this node subdivides its parent by; the tail divides by 1.
    fn division(self) -> usize {
        match self {
            Self::Tics(chain, level) => chain.tics[level].division(),
            Self::Axis(_) | Self::Tail => 1,
        }
    }

    pub fn interval_count(self) -> usize {
        match self {
            Self::Axis(_) => 1,
            Self::Tics(..) => self.division() * self.parent().interval_count(),
            Self::Tail => 0,
        }
    }

    pub fn direction(self) -> DVec4 {
        match self {
            Self::Axis(chain) => chain.direction,
            Self::Tics(..) => self.parent().direction(),
            Self::Tail => ZERO,
        }
    }

    /// Whether the next level may place a tic at interval `i` of its own subdivision.
    pub fn is_settable_position(self, i: usize) -> bool {
        match self {
            Self::Axis(_) => true,
            Self::Tics(..) => i % self.child().division() != 0,
            Self::Tail => false,
        }
    }

    /// Tic positions along the direction, recomputed on every call.
    pub fn positions(self) -> Vec<DVec4> {
        match self {
            Self::Tics(..) => {
                let intervals = self.interval_count();
                let distance = self.direction() / intervals as f64;
                let parent = self.parent();

                (0..=intervals)
                    .filter(|&i| parent.is_settable_position(i))
                    .map(|i| distance * i as f64)
                    .collect()
            }
            Self::Axis(_) | Self::Tail => Vec::new(),
        }
    }

    /// Draw this node only, when its section's `isDraw` is set.
    pub fn draw(self, affine: &DMat4, backend: &mut dyn Backend) {
        match self {
            Self::Axis(chain) => {
                if chain.options.flag("isDraw") {
                    draw_line(backend, affine, ZERO, chain.direction);
                }
            }
            Self::Tics(chain, level) => {
                let tics = &chain.tics[level];
                if tics.options.flag("isDraw") {
                    draw_parallel_lines(backend, affine, &self.positions(), tics.line);
                }
            }
            Self::Tail => {}
        }
    }
}

#[derive(Clone, Debug)]
pub struct GridLevel {
    options: Options,
}

impl GridLevel {
    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// Dashed lines through the tics of two axes, major then minor.
#[derive(Clone, Debug)]
pub struct GridChain {
    first: AxisId,
    second: AxisId,
    levels: [GridLevel; 2],
}

impl GridChain {
    /// Reads the `<first><second>Grid` and `<first><second>MGrid` sections.
    pub fn new(options: &Options, first: AxisId, second: AxisId) -> Self {
        let name = format!("{}{}", first.name(), second.name());
        Self {
            first,
            second,
            levels: [
                GridLevel {
                    options: options.section(format!("{name}Grid")),
                },
                GridLevel {
                    options: options.section(format!("{name}MGrid")),
                },
            ],
        }
    }

    pub fn axes(&self) -> (AxisId, AxisId) {
        (self.first, self.second)
    }

    pub fn levels(&self) -> &[GridLevel; 2] {
        &self.levels
    }

    /// Draw every level against the tics of `axes` at the same level.
    pub fn draw(&self, axes: &[AxisChain; 3], affine: &DMat4, backend: &mut dyn Backend) {
        let first = &axes[self.first.index()];
        let second = &axes[self.second.index()];

        for (level, grid) in self.levels.iter().enumerate() {
            if !grid.options.flag("isDraw") {
                continue;
            }
            let a = first.tics_subject(level);
            let b = second.tics_subject(level);

            backend.set_stroke(Stroke::GRID);
            draw_parallel_lines(backend, affine, &a.positions(), b.direction());
            draw_parallel_lines(backend, affine, &b.positions(), a.direction());
            backend.set_stroke(Stroke::Solid);
        }
    }
}
