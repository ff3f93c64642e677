use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Quit,
}

impl InputAction {
    pub fn direction(self) -> Option<Direction> {
        match self {
            InputAction::MoveUp => Some(Direction::Up),
            InputAction::MoveDown => Some(Direction::Down),
            InputAction::MoveLeft => Some(Direction::Left),
            InputAction::MoveRight => Some(Direction::Right),
            InputAction::Quit => None,
        }
    }

    /// Maps a text token from a line-oriented input source to an action.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "w" | "up" | "k" => Some(InputAction::MoveUp),
            "s" | "down" | "j" => Some(InputAction::MoveDown),
            "a" | "left" | "h" => Some(InputAction::MoveLeft),
            "d" | "right" | "l" => Some(InputAction::MoveRight),
            "q" | "quit" | "esc" | "escape" => Some(InputAction::Quit),
            _ => None,
        }
    }
}

/// Actions read from one line of a text input source, i.e. one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLine {
    pub actions: Vec<InputAction>,
    pub unknown_tokens: Vec<String>,
}

/// Tokens are separated by whitespace or commas. Blank lines and lines
/// starting with `#` carry no actions.
pub fn parse_action_line(line: &str) -> ActionLine {
    let mut parsed = ActionLine::default();
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return parsed;
    }
    for token in trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
    {
        match InputAction::from_token(token) {
            Some(action) => parsed.actions.push(action),
            None => parsed.unknown_tokens.push(token.to_string()),
        }
    }
    parsed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn step(self) -> Step {
        match self {
            Direction::Up => Step { dx: 0, dy: -1 },
            Direction::Down => Step { dx: 0, dy: 1 },
            Direction::Left => Step { dx: -1, dy: 0 },
            Direction::Right => Step { dx: 1, dy: 0 },
        }
    }

    pub const fn inverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Raw movement vector as delivered by an input adapter. Only the four
/// axis-aligned unit vectors convert into a [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

impl Step {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl From<Direction> for Step {
    fn from(direction: Direction) -> Self {
        direction.step()
    }
}

impl TryFrom<Step> for Direction {
    type Error = Step;

    fn try_from(step: Step) -> Result<Self, Self::Error> {
        match (step.dx, step.dy) {
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            _ => Err(step),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}
