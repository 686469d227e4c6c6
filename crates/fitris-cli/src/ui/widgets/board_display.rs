use fitris_engine::{Board, BoardPos};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        grid_len(self.board.width()) * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        grid_len(self.board.height()) * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// The area the cells are drawn in, given the area the widget renders to.
    pub fn grid_area(&self, area: Rect) -> Rect {
        self.block.inner_if_some(area)
    }
}

fn grid_len(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}

/// Screen rectangle of the cell at `pos`, with row 0 of the board at the
/// bottom of `grid`.
fn cell_rect(grid: Rect, board_height: usize, pos: BoardPos) -> Option<Rect> {
    let column = u16::try_from(pos.x).ok()?.checked_mul(CellDisplay::width())?;
    let row = u16::try_from(board_height).ok()?.checked_sub(1)?;
    let row = row.checked_sub(u16::try_from(pos.y).ok()?)?;
    let rect = Rect::new(
        grid.x.saturating_add(column),
        grid.y.saturating_add(row),
        CellDisplay::width(),
        CellDisplay::height(),
    )
    .intersection(grid);
    (!rect.is_empty()).then_some(rect)
}

/// Converts a screen position to board units, cells centred on integer
/// coordinates and `y` growing upwards.
#[expect(clippy::cast_precision_loss)]
pub fn screen_to_board(grid: Rect, board_height: usize, screen: Position) -> (f32, f32) {
    let column = f32::from(screen.x) - f32::from(grid.x) + 0.5;
    let row = f32::from(screen.y) - f32::from(grid.y);
    let x = column / f32::from(CellDisplay::width()) - 0.5;
    let y = board_height as f32 - 1.0 - row;
    (x, y)
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let grid = self.block.inner_if_some(area);

        for pos in self.board.positions() {
            if let Some(rect) = cell_rect(grid, self.board.height(), pos) {
                CellDisplay::from_visual(self.board.cell_visual(pos)).render(rect, buf);
            }
        }
    }
}
