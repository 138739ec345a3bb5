//! Line mode and one-shot mode

use parley_core::{ConversationController, Dispatch, Message};
use std::io::{self, BufRead, Write};

/// What a line typed in line mode asks for
#[derive(Debug, PartialEq, Eq)]
pub enum LineCommand<'a> {
    Quit,
    Menu,
    Clear,
    /// 1-based index into the visible menu
    Select(usize),
    Send(&'a str),
}

pub fn parse_line(line: &str) -> LineCommand<'_> {
    let trimmed = line.trim();
    match trimmed {
        ":quit" | ":q" => LineCommand::Quit,
        ":menu" => LineCommand::Menu,
        ":clear" => LineCommand::Clear,
        _ => match trimmed.parse::<usize>() {
            Ok(n) if n > 0 => LineCommand::Select(n),
            _ => LineCommand::Send(line),
        },
    }
}

/// Format a bot message the way line mode prints it
pub fn format_bot(message: &Message) -> String {
    let mut out = if message.is_error {
        format!("bot [error]> {}", message.text)
    } else {
        format!("bot> {}", message.text)
    };

    if !message.is_error {
        if let Some(source) = &message.source {
            out.push_str(&format!("\n  (source: {})", source));
        }
    }
    if !message.suggestions.is_empty() {
        out.push_str(&format!("\n  try: {}", message.suggestions.join(" | ")));
    }
    if message.ends_chat {
        out.push_str("\n  -- conversation ended --");
    }
    out
}

fn print_menu(controller: &ConversationController) {
    let state = controller.snapshot();
    if let Some(options) = state.active_menu() {
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option.label);
        }
    }
}

fn print_new_messages(controller: &ConversationController, seen: &mut usize) {
    let state = controller.snapshot();
    if state.messages.len() < *seen {
        *seen = 0;
    }
    for message in state.messages.iter().skip(*seen).filter(|m| m.is_bot()) {
        println!("{}", format_bot(message));
    }
    *seen = state.messages.len();
    print_menu(controller);
}

/// Interactive stdin/stdout conversation
pub async fn run_line_mode(controller: &ConversationController) -> anyhow::Result<()> {
    eprintln!("parley ({})", controller.endpoint());
    eprintln!("Type a message, a menu number, :menu, :clear or :quit");
    eprintln!();

    let stdin = io::stdin();
    let mut seen = 0usize;

    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim_end_matches(['\n', '\r']);

        match parse_line(line) {
            LineCommand::Quit => break,
            LineCommand::Clear => {
                controller.clear_conversation();
                seen = 0;
                println!("Cleared conversation.");
                continue;
            }
            LineCommand::Menu => controller.request_menu().await,
            LineCommand::Select(n) => {
                let command = controller
                    .snapshot()
                    .active_menu()
                    .and_then(|options| options.get(n - 1))
                    .map(|option| option.command.clone());
                match command {
                    Some(command) => controller.select_menu_option(&command).await,
                    // No such option: treat the number as text
                    None => controller.send_message(line).await,
                }
            }
            LineCommand::Send(text) => controller.send_message(text).await,
        };
        print_new_messages(controller, &mut seen);
        println!();
    }

    Ok(())
}

/// Send one message, print the reply and report whether it was an error
pub async fn run_once(controller: &ConversationController, text: &str) -> anyhow::Result<bool> {
    match controller.send_message(text).await {
        Dispatch::Settled(_) => {}
        Dispatch::Ignored => anyhow::bail!("nothing to send"),
        other => anyhow::bail!("message was not delivered: {:?}", other),
    }

    let state = controller.snapshot();
    let reply = state
        .messages
        .iter()
        .rev()
        .find(|m| m.is_bot())
        .ok_or_else(|| anyhow::anyhow!("no reply received"))?;

    println!("{}", format_bot(reply));
    print_menu(controller);
    Ok(!reply.is_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(":quit"), LineCommand::Quit);
        assert_eq!(parse_line(" :menu "), LineCommand::Menu);
        assert_eq!(parse_line(":clear"), LineCommand::Clear);
        assert_eq!(parse_line("2"), LineCommand::Select(2));
        assert_eq!(parse_line("0"), LineCommand::Send("0"));
        assert_eq!(parse_line("quanto custa?"), LineCommand::Send("quanto custa?"));
    }

    #[test]
    fn test_format_bot() {
        let mut reply = Message::bot("Temos três planos.");
        reply.source = Some("pricing.md".into());
        reply.ends_chat = true;
        assert_eq!(
            format_bot(&reply),
            "bot> Temos três planos.\n  (source: pricing.md)\n  -- conversation ended --"
        );

        let failure = Message::bot_error("Erro no servidor");
        assert_eq!(format_bot(&failure), "bot [error]> Erro no servidor");
    }
}
