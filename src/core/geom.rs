/// Screen coordinates in pixels. Widgets may be positioned anywhere before
/// clamping, so coordinates are signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_parts(pos: Pos, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.w, size.h)
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, p: Pos) -> bool {
        if self.is_empty() {
            return false;
        }
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Clamps `pos` so a `size`-sized box stays on a `screen`-sized surface:
/// `0 <= x <= screen.w - size.w`, same for `y`. A box larger than the screen
/// pins to the origin on that axis.
pub fn clamp_to_screen(pos: Pos, size: Size, screen: Size) -> Pos {
    let max_x = screen.w.saturating_sub(size.w).max(0);
    let max_y = screen.h.saturating_sub(size.h).max(0);
    Pos::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
}

#[cfg(test)]
#[path = "../../tests/unit/core/geom.rs"]
mod tests;
