use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is used by the machine to put the framebuffer somewhere a human can
/// see it. It should abstract the implementation details, so a variety of
/// kinds of screen would work.
pub trait Display {
    /// draw a whole frame: one byte per pixel, 0 or 1, row-major
    fn render(&mut self, pixels: &[u8]) -> Result<(), io::Error>;

    /// blank the surface
    fn clear(&mut self) -> Result<(), io::Error>;
}

// store useful metadata about the framebuffer being shown
struct Resolution(usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// canvas coordinates of every pixel that is `value`
    fn points_with<'a>(
        &self,
        pixels: &'a [u8],
        value: u8,
    ) -> impl std::iter::Iterator<Item = (f64, f64)> + 'a {
        let w = self.0;
        pixels
            .iter()
            .enumerate()
            .filter(move |(_, p)| **p == value)
            .map(move |(n, _)| {
                (
                    (n % w) as f64,        // x
                    -1.0 * (n / w) as f64, // y
                )
            })
    }
}

/// monochrome display in a terminal, rendered using TUI and Crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new(x: usize, y: usize) -> Result<MonoTermDisplay, io::Error> {
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(x, y),
        })
    }

    fn paint(&mut self, pixels: &[u8]) -> Result<(), io::Error> {
        let resolution = &self.resolution;
        // for now this assumes a 1:1 ratio between terminal cells and pixels
        self.terminal.draw(|f| {
            let size = Rect::new(0, 0, 2 + resolution.0 as u16, 2 + resolution.1 as u16);

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(resolution.x_bounds())
                .y_bounds(resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &resolution.points_with(pixels, 0).collect::<Vec<_>>(),
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &resolution.points_with(pixels, 1).collect::<Vec<_>>(),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

impl Display for MonoTermDisplay {
    fn render(&mut self, pixels: &[u8]) -> Result<(), io::Error> {
        // make sure we're given exactly the right amount of data to draw
        if pixels.len() != self.resolution.pixel_count() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "MonoTermDisplay expects {} pixels, got {}",
                    self.resolution.pixel_count(),
                    pixels.len()
                ),
            ));
        }
        self.paint(pixels)
    }

    fn clear(&mut self) -> Result<(), io::Error> {
        let blank = vec![0u8; self.resolution.pixel_count()];
        self.paint(&blank)
    }
}

impl Drop for MonoTermDisplay {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// useful for testing non-display routines; remembers what it was asked to do
#[derive(Debug, Default)]
pub struct DummyDisplay {
    pub renders: usize,
    pub clears: usize,
    pub last_frame: Vec<u8>,
}

impl DummyDisplay {
    pub fn new() -> Self {
        DummyDisplay::default()
    }
}

impl Display for DummyDisplay {
    fn render(&mut self, pixels: &[u8]) -> Result<(), io::Error> {
        self.renders += 1;
        self.last_frame = pixels.to_vec();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), io::Error> {
        self.clears += 1;
        self.last_frame.iter_mut().for_each(|p| *p = 0);
        Ok(())
    }
}
