use crate::config::GuideProfile;
use console::style;

/// Banner shown when an interactive chat opens.
pub fn display_banner(profile: &GuideProfile) {
    println!();
    println!(
        "{}",
        style(format!("Consult with {}", profile.name)).bold()
    );
    println!(
        "{}",
        style(format!("{} | {}", profile.title, profile.city)).dim()
    );
    println!(
        "{}",
        style("Type /help for commands. Ctrl-D closes the chat.").dim()
    );
    println!();
}

/// One guide turn, prefixed with the persona name.
pub fn display_reply(name: &str, text: &str) {
    println!("{} {}", style(format!("{}:", name)).bold().cyan(), text);
}

/// The typing cue shown while a request is pending.
pub fn display_reflecting(name: &str) {
    println!(
        "{}",
        style(format!("{} is reflecting...", name)).dim().italic()
    );
}

/// Remove the typing cue once the reply (or fallback) has landed.
pub fn clear_reflecting() {
    let term = console::Term::stdout();
    term.clear_last_lines(1).ok();
}

/// One-shot answers occasionally come back with markdown in them.
pub fn display_markdown(text: &str) {
    let skin = termimad::MadSkin::default();
    skin.print_text(text);
}
