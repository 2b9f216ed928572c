use crate::{
    context::{Context, ReadContext},
    control::Control,
    geom::{Direction, Position, Size},
    id::NodeId,
};

/// The axis a stack lays its children along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
}

impl Axis {
    /// Extent of a size along the stacking axis.
    fn main(self, s: Size) -> u32 {
        match self {
            Self::Vertical => s.h,
            Self::Horizontal => s.w,
        }
    }

    /// Extent of a size across the stacking axis.
    fn cross(self, s: Size) -> u32 {
        match self {
            Self::Vertical => s.w,
            Self::Horizontal => s.h,
        }
    }

    /// Build a size from main and cross extents.
    fn size(self, main: u32, cross: u32) -> Size {
        match self {
            Self::Vertical => Size::new(cross, main),
            Self::Horizontal => Size::new(main, cross),
        }
    }

    /// Build a position from a main-axis offset.
    fn offset(self, main: u32) -> Position {
        match self {
            Self::Vertical => Position::new(0, main),
            Self::Horizontal => Position::new(main, 0),
        }
    }

    /// Does a navigation direction run along this axis?
    fn runs_along(self, direction: Direction) -> bool {
        direction.is_vertical() == (self == Self::Vertical)
    }
}

/// Sum children along the main axis, each offered what the previous ones
/// left over.
fn measure(axis: Axis, proposed: Size, ctx: &dyn ReadContext) -> Size {
    let mut remaining = axis.main(proposed);
    let mut cross = 0;
    for child in ctx.children() {
        let want = ctx.measure(child, axis.size(remaining, axis.cross(proposed)));
        remaining -= axis.main(want).min(remaining);
        cross = cross.max(axis.cross(want).min(axis.cross(proposed)));
    }
    axis.size(axis.main(proposed) - remaining, cross)
}

/// Place children end to end and commit each at its measured main extent
/// and the full cross extent.
fn commit(axis: Axis, size: Size, ctx: &mut dyn Context) {
    ctx.set_size(size);
    let cross = axis.cross(size);
    let mut offset = 0;
    for child in ctx.children() {
        let remaining = axis.main(size) - offset;
        let main = axis
            .main(ctx.measure(child, axis.size(remaining, cross)))
            .min(remaining);
        ctx.set_child_position(child, axis.offset(offset));
        ctx.commit_child(child, axis.size(main, cross));
        offset += main;
    }
}

/// Find the nearest child past `index` in the direction of travel that
/// holds something selectable, deferring to the parent at the edges and
/// across the axis.
fn neighbor(
    axis: Axis,
    direction: Direction,
    index: usize,
    ctx: &dyn ReadContext,
) -> Option<NodeId> {
    if axis.runs_along(direction) {
        let children = ctx.children();
        let found = if direction.is_forward() {
            children
                .iter()
                .skip(index + 1)
                .find_map(|c| ctx.first_selectable(*c))
        } else {
            children
                .iter()
                .take(index)
                .rev()
                .find_map(|c| ctx.first_selectable(*c))
        };
        if found.is_some() {
            return found;
        }
    }
    ctx.parent_neighbor(direction)
}

/// A container that stacks its children top to bottom.
#[derive(Debug, Default, Clone, Copy)]
pub struct VStack;

impl VStack {
    /// Construct a vertical stack.
    pub fn new() -> Self {
        Self
    }
}

impl Control for VStack {
    fn measure(&self, proposed: Size, ctx: &dyn ReadContext) -> Size {
        measure(Axis::Vertical, proposed, ctx)
    }

    fn commit(&mut self, size: Size, ctx: &mut dyn Context) {
        commit(Axis::Vertical, size, ctx);
    }

    fn neighbor(
        &self,
        direction: Direction,
        index: usize,
        ctx: &dyn ReadContext,
    ) -> Option<NodeId> {
        neighbor(Axis::Vertical, direction, index, ctx)
    }
}

/// A container that stacks its children left to right.
#[derive(Debug, Default, Clone, Copy)]
pub struct HStack;

impl HStack {
    /// Construct a horizontal stack.
    pub fn new() -> Self {
        Self
    }
}

impl Control for HStack {
    fn measure(&self, proposed: Size, ctx: &dyn ReadContext) -> Size {
        measure(Axis::Horizontal, proposed, ctx)
    }

    fn commit(&mut self, size: Size, ctx: &mut dyn Context) {
        commit(Axis::Horizontal, size, ctx);
    }

    fn neighbor(
        &self,
        direction: Direction,
        index: usize,
        ctx: &dyn ReadContext,
    ) -> Option<NodeId> {
        neighbor(Axis::Horizontal, direction, index, ctx)
    }
}
