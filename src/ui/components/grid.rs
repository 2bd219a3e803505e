//! Result grid component renderer.
//!
//! Cards are laid out row-major, `columns` per row, each `card_width` wide
//! and [`CARD_HEIGHT`] tall:
//!
//! ```text
//!  #1  1920x1280  ♥ 12          #2  ♥ 3
//!  fox, red, animal             red fox, wildlife
//!  by Josch13                   by unknown
//!
//! ```

use crate::ui::helpers::{self, char_len, padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardInfo, GridInfo, CARD_HEIGHT};

/// Renders the visible cards starting at `row`.
///
/// Returns the row after the last card row drawn.
pub fn render_grid(row: usize, grid: &GridInfo, theme: &Theme) -> usize {
    let mut current_row = row;
    for card_row in grid.cards.chunks(grid.columns.max(1)) {
        for (column, card) in card_row.iter().enumerate() {
            let col = column * grid.card_width + 1;
            render_card(current_row, col, card, theme, grid.card_width);
        }
        current_row += CARD_HEIGHT;
    }
    current_row
}

/// Renders one card with its top-left corner at (`row`, `col`).
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`) over all three lines
/// 2. Query highlights in the caption
/// 3. Normal text, dim author line
fn render_card(row: usize, col: usize, card: &CardInfo, theme: &Theme, width: usize) {
    let inner = width.saturating_sub(2);
    let base = || {
        if card.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    };

    let number = format!("#{}", card.number);
    let meta = helpers::truncate(&card.meta, inner.saturating_sub(char_len(&number) + 2));
    position_cursor(row, col);
    base();
    print!(" {}", Theme::bold());
    print!("{number}");
    print!("{}", Theme::reset());
    base();
    if !card.is_selected {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    }
    print!("  {meta}");
    print!("{} ", padding(&format!("{number}  {meta}"), inner));
    print!("{}", Theme::reset());

    position_cursor(row + 1, col);
    base();
    print!(" ");
    helpers::render_highlighted_text(&card.caption, &card.highlight_ranges, theme, card.is_selected);
    print!("{} ", padding(&card.caption, inner));
    print!("{}", Theme::reset());

    let author = if card.author.is_empty() {
        String::new()
    } else {
        helpers::truncate(&format!("by {}", card.author), inner)
    };
    position_cursor(row + 2, col);
    base();
    if !card.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!(" {author}");
    print!("{} ", padding(&author, inner));
    print!("{}", Theme::reset());
}
