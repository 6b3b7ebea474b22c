//! Discord bot: gateway events, slash commands, buttons and modals.
//!
//! Interaction handlers stay thin. They build an `Actor` from the invoking member,
//! call into `service`, and turn the result into an ephemeral reply with
//! `AppError::user_message` for failures.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild, channel and role cache
//! - `GUILD_MEMBERS` - Member listing for inactivity checks and clan role sync (privileged
//!   intent)
//! - `GUILD_VOICE_STATES` - Voice tracking and attendance checks
//! - `GUILD_MESSAGES`, `DIRECT_MESSAGES` - Pasted OAuth redirects in DMs
//! - `MESSAGE_CONTENT` - Reading the pasted redirect (privileged intent)
//!
//! Both privileged intents must be enabled in the Discord Developer Portal for the bot
//! application.

pub mod command;
pub mod component;
pub mod handler;
pub mod modal;
pub mod reply;
pub mod start;
