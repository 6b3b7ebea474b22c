//! Typed access to slash command options.

use serenity::all::{CommandDataOption, CommandDataOptionValue};

#[derive(Clone, Copy)]
pub struct Options<'a>(&'a [CommandDataOption]);

impl<'a> Options<'a> {
    pub fn new(options: &'a [CommandDataOption]) -> Self {
        Self(options)
    }

    /// The invoked subcommand or subcommand group with its own options.
    pub fn subcommand(&self) -> Option<(&'a str, Options<'a>)> {
        self.0.iter().find_map(|option| match &option.value {
            CommandDataOptionValue::SubCommand(inner)
            | CommandDataOptionValue::SubCommandGroup(inner) => {
                Some((option.name.as_str(), Options(inner)))
            }
            _ => None,
        })
    }

    fn value(&self, name: &str) -> Option<&'a CommandDataOptionValue> {
        self.0
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.value(name)? {
            CommandDataOptionValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&'a str> {
        match self.value(name)? {
            CommandDataOptionValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<u64> {
        match self.value(name)? {
            CommandDataOptionValue::User(id) => Some(id.get()),
            _ => None,
        }
    }

    pub fn role(&self, name: &str) -> Option<u64> {
        match self.value(name)? {
            CommandDataOptionValue::Role(id) => Some(id.get()),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<u64> {
        match self.value(name)? {
            CommandDataOptionValue::Channel(id) => Some(id.get()),
            _ => None,
        }
    }
}
