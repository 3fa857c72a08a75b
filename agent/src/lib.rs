//! NoGo playing agent.
//!
//! The externally-visible facade over the [`mcts`] engine: a [`Player`]
//! is configured from a flat `key=value` property string (`name`, `role`,
//! `seed`, `search`, `timeout`, `simulation`, `thread`) and emits one
//! placement per [`Player::take_action`] call, or the `None` sentinel
//! when its side has no legal placement left.
//!
//! ```rust,ignore
//! use agent::Player;
//! use games_nogo::Board;
//!
//! let mut player = Player::new("name=demo role=black search=mcts simulation=500")?;
//! let action = player.take_action(&Board::new());
//! ```

pub mod player;
pub mod properties;

pub use player::{AgentError, Player};
pub use properties::Properties;
