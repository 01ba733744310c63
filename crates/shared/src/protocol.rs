//! Message vocabulary
//!
//! Every frame starts with a little-endian `i32` opcode followed by the
//! fields of that message kind, in declaration order:
//!
//! | Opcode | Message | Payload |
//! |---|---|---|
//! | -3 | `Ready` | none |
//! | -2 | `Exit` | none |
//! | -1 | `Hello` | none |
//! | 0 | `Ping` | none |
//! | 1 | `Chat` | string author, string message |
//! | 2 | `PieceColour` | bool is_white |
//! | 3 | `GuestJoined` | none |
//! | 4 | `StartGame` | none |
//! | 5 | `BasicMove` | i32 x, i32 y, i32 x1, i32 y1 |
//! | 6 | `YourMove` | none |
//!
//! `Ready` and `Exit` are also raised locally by a session to its own
//! listeners; they are never required from a peer.

use crate::buffer::Buffer;
use crate::error::DecodeError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum Opcode {
    Ready = -3,
    Exit = -2,
    Hello = -1,
    Ping = 0,
    Chat = 1,
    PieceColour = 2,
    GuestJoined = 3,
    StartGame = 4,
    BasicMove = 5,
    YourMove = 6,
}

impl Opcode {
    pub const ALL: [Opcode; 10] = [
        Opcode::Ready,
        Opcode::Exit,
        Opcode::Hello,
        Opcode::Ping,
        Opcode::Chat,
        Opcode::PieceColour,
        Opcode::GuestJoined,
        Opcode::StartGame,
        Opcode::BasicMove,
        Opcode::YourMove,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Opcode {
    type Error = DecodeError;

    fn try_from(code: i32) -> Result<Self, DecodeError> {
        Opcode::ALL
            .into_iter()
            .find(|op| op.code() == code)
            .ok_or(DecodeError::UnknownOpcode(code))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

/// One protocol message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Ready,
    Exit,
    Hello,
    Ping,
    Chat { author: String, message: String },
    PieceColour { is_white: bool },
    GuestJoined,
    StartGame,
    /// Move from `(x, y)` to `(x1, y1)`, file then rank, zero-based
    BasicMove { x: i32, y: i32, x1: i32, y1: i32 },
    YourMove,
}

impl Message {
    pub fn opcode(&self) -> Opcode {
        match self {
            Message::Ready => Opcode::Ready,
            Message::Exit => Opcode::Exit,
            Message::Hello => Opcode::Hello,
            Message::Ping => Opcode::Ping,
            Message::Chat { .. } => Opcode::Chat,
            Message::PieceColour { .. } => Opcode::PieceColour,
            Message::GuestJoined => Opcode::GuestJoined,
            Message::StartGame => Opcode::StartGame,
            Message::BasicMove { .. } => Opcode::BasicMove,
            Message::YourMove => Opcode::YourMove,
        }
    }

    pub fn chat(author: impl Into<String>, message: impl Into<String>) -> Self {
        Message::Chat {
            author: author.into(),
            message: message.into(),
        }
    }

    /// Serialize to a single frame
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Buffer::with_capacity(20);
        buffer.write_i32(self.opcode().code());
        match self {
            Message::Chat { author, message } => {
                buffer.write_str(author).write_str(message);
            }
            Message::PieceColour { is_white } => {
                buffer.write_bool(*is_white);
            }
            Message::BasicMove { x, y, x1, y1 } => {
                buffer.write_i32(*x).write_i32(*y).write_i32(*x1).write_i32(*y1);
            }
            _ => {}
        }
        buffer.collect()
    }

    /// Parse a frame. Trailing bytes after the last field are ignored.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Eof`] for a truncated frame, [`DecodeError::UnknownOpcode`]
    /// for an opcode outside the table, and the string errors of
    /// [`Buffer::read_string`].
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut buffer = Buffer::from_bytes(bytes);
        let message = match Opcode::try_from(buffer.read_i32()?)? {
            Opcode::Ready => Message::Ready,
            Opcode::Exit => Message::Exit,
            Opcode::Hello => Message::Hello,
            Opcode::Ping => Message::Ping,
            Opcode::Chat => Message::Chat {
                author: buffer.read_string()?,
                message: buffer.read_string()?,
            },
            Opcode::PieceColour => Message::PieceColour {
                is_white: buffer.read_bool()?,
            },
            Opcode::GuestJoined => Message::GuestJoined,
            Opcode::StartGame => Message::StartGame,
            Opcode::BasicMove => Message::BasicMove {
                x: buffer.read_i32()?,
                y: buffer.read_i32()?,
                x1: buffer.read_i32()?,
                y1: buffer.read_i32()?,
            },
            Opcode::YourMove => Message::YourMove,
        };
        Ok(message)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Chat { author, message } => write!(f, "Chat({author}: {message})"),
            Message::PieceColour { is_white } => write!(f, "PieceColour(white={is_white})"),
            Message::BasicMove { x, y, x1, y1 } => write!(f, "BasicMove({x},{y} -> {x1},{y1})"),
            other => write!(f, "{:?}", other.opcode()),
        }
    }
}
