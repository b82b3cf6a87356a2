//! Interactive chat loop over stdin.

use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use opportunai_chat::{ChatError, ChatMessage, ConversationSession, IgnoreReason, SubmitOutcome};

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatInput {
    Quit,
    /// `:N`, 1-based index into the active quick replies.
    QuickReply(usize),
    Text(String),
}

pub fn parse_input(line: &str) -> ChatInput {
    let line = line.trim();
    if line == "/quit" {
        return ChatInput::Quit;
    }
    if let Some(n) = line.strip_prefix(':').and_then(|n| n.parse::<usize>().ok()) {
        return ChatInput::QuickReply(n);
    }
    ChatInput::Text(line.to_string())
}

/// Render a bot turn followed by its numbered quick replies.
pub fn render_bot(message: &ChatMessage) -> String {
    let mut out = String::new();
    for line in message.text.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    if !message.quick_replies.is_empty() {
        out.push('\n');
        for (i, reply) in message.quick_replies.iter().enumerate() {
            let _ = writeln!(out, "  [:{}] {}", i + 1, reply);
        }
    }
    out
}

/// Run the conversation until `/quit` or end of input.
pub async fn run(session: ConversationSession) -> Result<(), ChatError> {
    if let Some(greeting) = session.messages().last() {
        println!("{}", render_bot(greeting));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input");
                break;
            }
        };

        let outcome = match parse_input(&line) {
            ChatInput::Quit => break,
            ChatInput::QuickReply(n) => {
                let active = session.active_quick_replies();
                match n.checked_sub(1).and_then(|i| active.get(i)) {
                    Some(label) => {
                        println!("> {}", label);
                        session.select_quick_reply(label)
                    }
                    None => {
                        println!("  Opção inválida. Use :1 a :{}.", active.len());
                        continue;
                    }
                }
            }
            ChatInput::Text(text) => session.submit(&text),
        };

        match outcome {
            SubmitOutcome::Accepted(pending) => {
                println!("  ...");
                let reply = pending.wait().await?;
                println!("{}", render_bot(&reply));
            }
            SubmitOutcome::Ignored(IgnoreReason::Empty) => {}
            SubmitOutcome::Ignored(reason) => {
                tracing::debug!(?reason, "Input ignored");
            }
        }
    }

    session.close();
    Ok(())
}
