use crate::state::GameState;

const SNAKE_BODY_CHAR: char = 'o';
const FOOD_CHAR: char = 'x';
const BORDER_CHAR: char = '*';
const EMPTY_CHAR: char = ' ';

pub const GAME_OVER_MESSAGE: &str = "Game Over! Press q to quit.\n";
pub const WIN_MESSAGE: &str = "You won! Press q to quit.\n";
pub const INSTRUCTIONS: &str = "Use arrow keys to move. Press q to quit.\n";

/// Draws the whole frame: the bordered board followed by the instructions
/// line, or the end-of-game message once the game is over.
pub fn render(state: &GameState) -> String {
    if state.game_over {
        let message = if state.won { WIN_MESSAGE } else { GAME_OVER_MESSAGE };
        return message.to_string();
    }

    let width = state.board.width.max(0) as usize;
    let height = state.board.height.max(0) as usize;
    let mut grid = vec![vec![EMPTY_CHAR; width]; height];

    let mut mark = |x: i32, y: i32, ch: char| {
        if let Some(cell) = grid.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            *cell = ch;
        }
    };

    for p in state.snake.segments() {
        mark(p.x, p.y, SNAKE_BODY_CHAR);
    }
    mark(state.food.x, state.food.y, FOOD_CHAR);

    let border: String = std::iter::repeat(BORDER_CHAR).take(width + 2).collect();
    let mut out = String::with_capacity((width + 3) * (height + 2) + INSTRUCTIONS.len());

    out.push_str(&border);
    out.push('\n');
    for row in &grid {
        out.push(BORDER_CHAR);
        out.extend(row.iter());
        out.push(BORDER_CHAR);
        out.push('\n');
    }
    out.push_str(&border);
    out.push('\n');
    out.push_str(INSTRUCTIONS);

    out
}
