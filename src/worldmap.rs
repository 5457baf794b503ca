//! ASCII world map with a highlighted location marker.

use crate::style;
use crate::terminal::{BoxStyle, Terminal};

/// Logical grid dimensions used by the projection
pub const GRID_WIDTH: usize = 64;
pub const GRID_HEIGHT: usize = 17;

// Hand-tuned world outline. Opaque template: blank cells are water,
// everything else is land. Rows wider than the logical grid keep their
// extra cells; shorter rows are padded with water.
const WORLD_TEMPLATE: [&str; GRID_HEIGHT] = [
    r"           . _..::__:  ,-'-'.+       |]       ,     _,.__             ",
    r"   _.___ _ _<_>`!(._`.`-.    /        _._     `_ ,_/  '  '-._.---.-.__",
    r" .{     ' ' `-==,',._\{  \  / {) _   / _ '>_,-' `                _-/_ ",
    r" \_.:--.       `._ )`^-. ''      , [_/(                       __,/-'  ",
    r"''     \         '    _L       oD_,--'                )     /. (|    ",
    r"         |           ,'         _)_.\\._<> 6              _,' /  '    ",
    r"         `.         /          [_/_'` `'(                <'}  )       ",
    r"          \\    .-. )          /   `-''..' `:._          _)  '        ",
    r"   `        \  (  `(          /         `:\  > \  ,-^.  /' '          ",
    r"             `._,   ''        |           \`'   \|   ?_)  {\          ",
    r"                `=.---.       `._._       ,'     '`  |' ,- '.         ",
    r"                  |    `-._        |     /          `:`<_|h--._       ",
    r"                  (        >       .     | ,          `=.__.`-'\      ",
    r"                   `.     /        |     |{|              ,-.,\     . ",
    r"                    |   ,'          \   / `'            ,'     \     ",
    r"                    |  /             |_'                |  __  /      ",
    r"                    | |                                 |  L.\'       ",
];

/// Per-cell classification of the rendered grid
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellKind {
    Water,
    Land,
    Marker,
}

/// Equirectangular projection of a coordinate onto the grid.
/// Out-of-range inputs are clamped, never rejected.
pub fn project(lat: f64, lon: f64) -> (usize, usize) {
    let x = ((lon + 180.0) / 360.0 * GRID_WIDTH as f64).floor() as i64;
    let y = ((90.0 - lat) / 180.0 * GRID_HEIGHT as f64).floor() as i64;
    (
        x.clamp(0, GRID_WIDTH as i64 - 1) as usize,
        y.clamp(0, GRID_HEIGHT as i64 - 1) as usize,
    )
}

/// Build the classified cell grid with the marker placed at the
/// projection of (lat, lon). Pure function of its inputs.
pub fn cells(lat: f64, lon: f64) -> Vec<Vec<CellKind>> {
    let mut grid: Vec<Vec<CellKind>> = WORLD_TEMPLATE
        .iter()
        .map(|line| {
            let mut row: Vec<CellKind> = line
                .chars()
                .map(|ch| if ch == ' ' { CellKind::Water } else { CellKind::Land })
                .collect();
            while row.len() < GRID_WIDTH {
                row.push(CellKind::Water);
            }
            row
        })
        .collect();

    let (x, y) = project(lat, lon);
    if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
        *cell = CellKind::Marker;
    }

    grid
}

/// Draw the bordered map block with its top-left corner at (x0, y0).
/// Returns the block's (width, height) in cells.
pub fn draw(term: &mut Terminal, x0: i32, y0: i32, lat: f64, lon: f64) -> (usize, usize) {
    let grid = cells(lat, lon);
    let inner_w = grid.iter().map(|row| row.len()).max().unwrap_or(GRID_WIDTH);

    // 1 border cell plus 2 padding columns / 1 padding row on each side
    let w = inner_w + 6;
    let h = GRID_HEIGHT + 4;

    term.draw_box(x0, y0, w, h, BoxStyle::Rounded, style::BORDER);

    for (gy, row) in grid.iter().enumerate() {
        for (gx, kind) in row.iter().enumerate() {
            let (color, bold) = match kind {
                CellKind::Water => (style::WATER, false),
                CellKind::Land => (style::LAND, false),
                CellKind::Marker => (style::MARKER, true),
            };
            term.set(x0 + 3 + gx as i32, y0 + 2 + gy as i32, '•', Some(color), bold);
        }
    }

    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_stays_on_grid_at_extremes() {
        for &(lat, lon) in &[
            (90.0, -180.0),
            (90.0, 180.0),
            (-90.0, -180.0),
            (-90.0, 180.0),
            (0.0, 0.0),
        ] {
            let (x, y) = project(lat, lon);
            assert!(x < GRID_WIDTH, "column {} out of range for {:?}", x, (lat, lon));
            assert!(y < GRID_HEIGHT, "row {} out of range for {:?}", y, (lat, lon));
        }
    }

    #[test]
    fn projection_clamps_boundary_values() {
        assert_eq!(project(90.0, -180.0), (0, 0));
        assert_eq!(project(-90.0, 180.0), (GRID_WIDTH - 1, GRID_HEIGHT - 1));
    }

    #[test]
    fn projection_is_monotonic() {
        let mut prev_x = 0;
        for step in 0..=72 {
            let lon = -180.0 + step as f64 * 5.0;
            let (x, _) = project(0.0, lon);
            assert!(x >= prev_x, "column decreased at lon {}", lon);
            prev_x = x;
        }

        let mut prev_y = GRID_HEIGHT - 1;
        for step in 0..=36 {
            let lat = -90.0 + step as f64 * 5.0;
            let (_, y) = project(lat, 0.0);
            assert!(y <= prev_y, "row increased at lat {}", lat);
            prev_y = y;
        }
    }

    #[test]
    fn london_marker_lands_on_expected_cell() {
        assert_eq!(project(51.5, -0.12), (31, 3));

        let grid = cells(51.5, -0.12);
        assert_eq!(grid[3][31], CellKind::Marker);

        let marker_count = grid
            .iter()
            .flatten()
            .filter(|&&kind| kind == CellKind::Marker)
            .count();
        assert_eq!(marker_count, 1);
    }

    #[test]
    fn rows_are_at_least_grid_width() {
        let grid = cells(0.0, 0.0);
        assert_eq!(grid.len(), GRID_HEIGHT);
        for row in &grid {
            assert!(row.len() >= GRID_WIDTH);
        }
    }

    #[test]
    fn template_classifies_land_and_water() {
        let grid = cells(-90.0, -180.0);
        // Top-left corner of the template is blank ocean
        assert_eq!(grid[0][0], CellKind::Water);
        // Known land cell from the template outline
        assert_eq!(grid[0][11], CellKind::Land);
    }
}
