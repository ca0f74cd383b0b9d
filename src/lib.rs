//! # Rail Schedule Bot
//!
//! A Telegram bot that looks up Israel Railways timetables between two
//! stations and sends a monthly reminder to a configured chat.
//!
//! ## Features
//! - Home / work shortcuts and a free-text route dialogue
//! - Station suggestions matched on Hebrew or English names
//! - Per-user schedule cache with a configurable TTL
//! - Monthly reminder shortly before the end of the month
//! - HTTP health endpoints

/// Telegram commands, dialogue and update handlers
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Error taxonomy shared by the bot and its services
pub mod error;
/// Background and network services: schedules, cache, reminders, health
pub mod services;
/// Station directory and lookup
pub mod stations;
/// Utility functions for datetime, validation, and formatting
pub mod utils;
