//! Fixed texts the bot sends.

pub const NAME_PROMPT: &str = "Hi! I'm MovieBot. What's your name?";
pub const YEAR_PROMPT: &str = "Enter a release year ( YYYY )";
pub const GOOD_MOOD: &str = "Good";
pub const CONSOLATION: &str = "I'm sorry you feel that way, maybe a Comedy will cheer you up?";
pub const CLOSING: &str = "I know About All Movies, just ask Anytime!";
pub const NOT_UNDERSTOOD: &str = "Sorry I didn't understand, I'm a bot";
pub const CATALOG_APOLOGY: &str = "Oops, an error, can you please say 'movie' again?";

pub fn mood_prompt(name: &str) -> String {
    format!("Hi {}, How are you?", name)
}

pub fn truncation_notice(max: usize) -> String {
    format!("Sorry, I can only show the first {} movies:", max)
}
