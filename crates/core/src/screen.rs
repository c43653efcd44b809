//! Screen module - the character grid handed to the display.
//!
//! One character per field cell plus one trailing line for the score. The grid
//! keeps its allocation across frames; [`Screen::resize`] only reallocates when
//! the field geometry changes.

/// Rectangular character buffer, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    width: u16,
    height: u16,
    cells: Vec<char>,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells.resize(width as usize * height as usize, ' ');
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Write one character; positions outside the grid are dropped
    pub fn put_char(&mut self, x: i32, y: i32, ch: char) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = ch;
        }
    }

    /// Write a string starting at (x, y), clipped to the grid width
    pub fn put_str(&mut self, x: i32, y: i32, s: &str) {
        for (dx, ch) in s.chars().enumerate() {
            self.put_char(x + dx as i32, y, ch);
        }
    }

    pub fn fill(&mut self, ch: char) {
        self.cells.fill(ch);
    }

    pub fn row(&self, y: u16) -> &[char] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        (0..self.height).map(move |y| self.row(y))
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.rows().map(|r| r.iter().collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_is_clipped_to_width() {
        let mut screen = Screen::new(5, 1);
        screen.put_str(0, 0, "score = 120");
        assert_eq!(screen.to_lines(), vec!["score"]);
    }

    #[test]
    fn out_of_grid_writes_are_ignored() {
        let mut screen = Screen::new(2, 2);
        screen.put_char(-1, 0, 'A');
        screen.put_char(0, 2, 'B');
        assert_eq!(screen.to_lines(), vec!["  ", "  "]);
    }

    #[test]
    fn resize_keeps_requested_geometry() {
        let mut screen = Screen::new(2, 2);
        screen.resize(3, 4);
        assert_eq!((screen.width(), screen.height()), (3, 4));
        assert_eq!(screen.rows().count(), 4);
        assert!(screen.rows().all(|r| r.len() == 3));
    }
}
