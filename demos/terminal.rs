//! Terminal dashboard demo.
//!
//! Builds a small dashboard every frame, solves it against the terminal size
//! and paints each box as an ASCII frame. Resize the terminal to watch the
//! layout follow; press `q` or `Esc` to quit.
//!
//! ```text
//! RUST_LOG=boxtree=trace cargo run --example terminal
//! ```

use std::cell::RefCell;
use std::io::{self, Write, stdout};
use std::rc::Rc;
use std::time::Duration;

use boxtree::{Alignment, Axis, LayoutTree, Rect, SizePolicy, TreeConfig};
use crossterm::event::{Event, KeyCode, poll, read};
use crossterm::style::Print;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size,
};
use crossterm::{cursor, execute, queue};

// =============================================================================
// CANVAS
// =============================================================================

/// Character grid the draw callbacks paint into.
struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    fn new(width: u16, height: u16) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    fn put(&mut self, x: i64, y: i64, ch: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = ch;
    }

    fn frame(&mut self, rect: Rect, title: &str) {
        let (x0, y0) = (rect.x.round() as i64, rect.y.round() as i64);
        let (x1, y1) = (
            rect.right().round() as i64 - 1,
            rect.bottom().round() as i64 - 1,
        );
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        for x in x0..=x1 {
            self.put(x, y0, '-');
            self.put(x, y1, '-');
        }
        for y in y0..=y1 {
            self.put(x0, y, '|');
            self.put(x1, y, '|');
        }
        for (x, y) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
            self.put(x, y, '+');
        }
        for (i, ch) in title.chars().enumerate() {
            let x = x0 + 2 + i as i64;
            if x >= x1 {
                break;
            }
            self.put(x, y0, ch);
        }
    }

    fn text(&mut self, rect: Rect, text: &str) {
        let width = rect.width.floor().max(1.0) as usize;
        for (row, line) in wrap(text, width).iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                self.put(rect.x as i64 + col as i64, rect.y as i64 + row as i64, ch);
            }
        }
    }

    fn flush(&self, out: &mut impl Write) -> io::Result<()> {
        for row in 0..self.height {
            let line: String = self.cells[row * self.width..(row + 1) * self.width]
                .iter()
                .collect();
            queue!(out, cursor::MoveTo(0, row as u16), Print(line))?;
        }
        out.flush()
    }
}

/// Greedy word wrap into lines of at most `width` characters.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

// =============================================================================
// DASHBOARD
// =============================================================================

const ABOUT: &str = "boxtree lays out nested boxes in six passes: fit, grow, wrap, \
                     fit, grow, position. Resize the terminal to see growers share \
                     the free space. Press q to quit.";

#[rustfmt::skip]
fn build(tree: &mut LayoutTree, canvas: &Rc<RefCell<Canvas>>) -> Result<(), boxtree::LayoutError> {
    let panel = |title: &'static str| {
        let canvas = canvas.clone();
        move |rect: Rect| canvas.borrow_mut().frame(rect, title)
    };
    let body = |text: &'static str| {
        let canvas = canvas.clone();
        move |rect: Rect| canvas.borrow_mut().text(rect, text)
    };

    tree.begin_root()
        .set_child_layout_axis(Axis::Y)
        .set_draw_func(panel("boxtree"))
        .set_padding_all(1.0)
        .set_child_spacing(1.0);

    // header
    tree.begin()
        .set_size_policy_x(SizePolicy::Grow)
        .set_size_policy_y(SizePolicy::Fixed)
        .set_dimensions(0.0, 3.0)
        .set_child_alignment_x(Alignment::Center)
        .set_child_alignment_y(Alignment::Center)
        .set_draw_func(panel("header"))
        .begin()
            .set_size_policy(SizePolicy::Fixed)
            .set_dimensions(14.0, 1.0)
            .set_draw_func(body("layout  demo"))
        .end()
    .end();

    // columns
    tree.begin()
        .set_size_policy(SizePolicy::Grow)
        .set_child_spacing(1.0);

    tree.begin()
        .set_size_policy_x(SizePolicy::Fixed)
        .set_size_policy_y(SizePolicy::Grow)
        .set_dimensions(18.0, 0.0)
        .set_child_layout_axis(Axis::Y)
        .set_padding_all(1.0)
        .set_draw_func(panel("menu"));
    for item in ["overview", "nodes", "passes"] {
        tree.begin()
            .set_size_policy_x(SizePolicy::Grow)
            .set_size_policy_y(SizePolicy::Fixed)
            .set_dimensions(0.0, 1.0)
            .set_draw_func(body(item))
            .end();
    }
    tree.end();

    tree.begin()
        .set_size_policy(SizePolicy::Grow)
        .set_padding_all(1.0)
        .set_draw_func(panel("about"))
        .begin()
            .set_size_policy_x(SizePolicy::Grow)
            .set_wrap_func(|width| wrap(ABOUT, width.floor().max(1.0) as usize).len() as f32)
            .set_draw_func(body(ABOUT))
        .end()
    .end();

    tree.begin()
        .set_size_policy(SizePolicy::Grow)
        .set_max_size(30.0, f32::INFINITY)
        .set_draw_func(panel("side"))
        .end();

    tree.end();

    tree.end_root().map(|_| ())
}

fn render(tree: &mut LayoutTree, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = size()?;
    let canvas = Rc::new(RefCell::new(Canvas::new(width, height)));

    build(tree, &canvas)?;
    tree.update_layout(f32::from(width), f32::from(height))?;
    tree.draw()?;

    canvas.borrow().flush(out)?;
    Ok(())
}

fn run(out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let mut tree = LayoutTree::new(TreeConfig::new(32));
    render(&mut tree, out)?;

    loop {
        if !poll(Duration::from_millis(250))? {
            continue;
        }
        match read()? {
            Event::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => break,
            Event::Resize(_, _) => render(&mut tree, out)?,
            _ => {}
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut out = stdout();
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut out);

    execute!(out, cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}
