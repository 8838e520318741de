//! Prompt templates for the dialogue flow

use crate::dialogue::act::Act;

/// Templates for the texts sent at each step of the dialogue
pub struct PromptTemplate;

impl PromptTemplate {
    /// Moderator instruction for each act; in Act 1 the moderator is told
    /// to say `trigger_phrase` once it has heard enough
    pub fn moderator_instruction(act: Act, trigger_phrase: &str) -> String {
        match act {
            Act::Clarify => format!(
                r#"Directly engage with the most recent thoughts shared in the conversation. Ask probing questions that explore motivations, consequences, and reasoning behind the Inquirer's statements. Avoid abstract philosophical discussions unrelated to the topic. Never repeat a question that was already answered. Keep responses to 1-2 sentences. Once you understand the situation well enough, say that you are "{}"."#,
                trigger_phrase.trim()
            ),
            Act::Discuss => r#"Summarize the Inquirer's situation for the other participants who are joining the discussion. State the decision at hand, the options, and what matters most to the Inquirer. Do not ask questions and do not give advice yet. Keep it to 3-4 sentences."#
                .to_string(),
            Act::Close => r#"Close the dialogue. Weigh the arguments the participants made, note where they agreed and where they differed, and offer the Inquirer a clear, practical synthesis to act on. Keep it to 3-5 sentences."#
                .to_string(),
        }
    }

    /// Content of the moderator turn that opens Act 2
    pub fn summary_request() -> &'static str {
        "Summarize the Inquirer's situation so far for the participants who just joined."
    }

    /// Content for a discussant turn in the given round (0-indexed)
    pub fn round_directive(round: u32) -> &'static str {
        if round == 0 {
            "Respond with your perspective on the Inquirer's situation. Don't ask questions."
        } else {
            "Continue the discussion. Build on the points made so far, don't repeat your stance, and debate the others respectfully."
        }
    }

    /// Content for a discussant's closing remarks in Act 3
    pub fn closing_directive() -> &'static str {
        "Give your closing remark to the Inquirer: your single most important piece of advice. Don't ask questions."
    }

    /// Content of the moderator's final synthesis turn
    pub fn synthesis_request() -> &'static str {
        "Deliver the final synthesis of this dialogue to the Inquirer."
    }

    /// System announcement for a persona entering the discussion
    pub fn joined_announcement(name: &str) -> String {
        format!("{} joined the chat", name)
    }

    /// System notice appended once the dialogue is over
    pub fn conclusion_notice() -> &'static str {
        "The dialogue has concluded."
    }

    /// System notice appended when a submission is interrupted by an error
    pub fn interruption_notice() -> &'static str {
        "Our dialogue was interrupted by an error."
    }
}
