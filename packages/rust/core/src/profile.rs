//! Collection of the structured profile consumed by the LLM renderer.
//!
//! The question flow lives here; how questions reach a person is injected
//! through [`ProfilePrompter`], so the flow runs the same against a terminal
//! or a scripted test double.

use serde::Serialize;
use tracing::debug;

use resumekit_shared::Result;

/// Source of answers for profile questions.
pub trait ProfilePrompter {
    /// Ask one question and return the raw answer line (may be empty).
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Show an informational message.
    fn say(&mut self, message: &str);
}

/// Contact fields already known from the command line.
#[derive(Debug, Clone, Default)]
pub struct ContactDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// One employer in the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmploymentEntry {
    pub employer: String,
    pub duration: String,
    pub role: String,
    pub highlights: String,
}

/// Everything the LLM renderer knows about the person besides the raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub experiences: Vec<EmploymentEntry>,
    pub skills: Vec<String>,
    pub tools: Vec<String>,
    pub english_level: Option<String>,
    pub languages: Vec<String>,
}

/// Fill in the profile, asking only for what `known` lacks plus the
/// professional details that are always collected.
pub fn collect_user_profile(
    prompter: &mut dyn ProfilePrompter,
    known: ContactDetails,
) -> Result<UserProfile> {
    let first_name = known_or_ask(prompter, known.first_name, "First name: ")?;
    let last_name = known_or_ask(prompter, known.last_name, "Last name: ")?;
    let phone = known_or_ask(prompter, known.phone, "Phone number: ")?;
    let email = known_or_ask(prompter, known.email, "Email address: ")?;

    prompter.say(
        "Provide professional details. Press Enter to skip optional prompts; you can refine later.",
    );
    let experiences = ask_experiences(prompter)?;

    let skills = ask_list(prompter, "Skills you possess")?;
    let tools = ask_list(prompter, "Software products/tools you can work with")?;
    let english_level = Some(
        prompter
            .ask("English level (e.g., A2/B1/B2/C1/C2 or native): ")?
            .trim()
            .to_string(),
    )
    .filter(|s| !s.is_empty());
    let languages = ask_list(
        prompter,
        "Other languages you speak (exclude English if already listed)",
    )?;

    debug!(
        experiences = experiences.len(),
        skills = skills.len(),
        tools = tools.len(),
        "profile collected"
    );

    Ok(UserProfile {
        first_name,
        last_name,
        phone,
        email,
        experiences,
        skills,
        tools,
        english_level,
        languages,
    })
}

fn known_or_ask(
    prompter: &mut dyn ProfilePrompter,
    known: Option<String>,
    question: &str,
) -> Result<String> {
    match known.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None => ask_required(prompter, question),
    }
}

/// Repeat the question until the answer is non-empty.
fn ask_required(prompter: &mut dyn ProfilePrompter, question: &str) -> Result<String> {
    loop {
        let answer = prompter.ask(question)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
    }
}

/// Required comma-separated list; blank items are dropped.
fn ask_list(prompter: &mut dyn ProfilePrompter, question: &str) -> Result<Vec<String>> {
    let raw = ask_required(prompter, &format!("{question} (comma-separated): "))?;
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

/// Employment entries until an empty employer; at least one is required.
fn ask_experiences(prompter: &mut dyn ProfilePrompter) -> Result<Vec<EmploymentEntry>> {
    loop {
        prompter.say("Enter work experiences. Leave employer empty to finish.");
        let mut items = Vec::new();

        loop {
            let employer = prompter.ask("Employer organization: ")?.trim().to_string();
            if employer.is_empty() {
                break;
            }
            let duration = ask_required(
                prompter,
                "Length of employment with this organization (e.g., 2019-2022 or 18 months): ",
            )?;
            let role = prompter.ask("Role/Title (optional): ")?.trim().to_string();
            let highlights = prompter
                .ask("Key achievements/responsibilities (optional, semicolon-separated): ")?
                .trim()
                .to_string();

            items.push(EmploymentEntry {
                employer,
                duration,
                role,
                highlights,
            });
        }

        if !items.is_empty() {
            return Ok(items);
        }
        prompter.say("At least one experience is required.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use resumekit_shared::ResumeKitError;

    /// Answers questions from a fixed script and records what was asked.
    struct ScriptedPrompter {
        answers: VecDeque<String>,
        questions: Vec<String>,
        messages: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|s| s.to_string()).collect(),
                questions: Vec::new(),
                messages: Vec::new(),
            }
        }
    }

    impl ProfilePrompter for ScriptedPrompter {
        fn ask(&mut self, question: &str) -> Result<String> {
            self.questions.push(question.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| ResumeKitError::Prompt("script exhausted".into()))
        }

        fn say(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    fn full_contact() -> ContactDetails {
        ContactDetails {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            phone: Some("555-0100".into()),
            email: Some("ada@example.com".into()),
        }
    }

    #[test]
    fn known_contact_fields_are_not_asked() {
        let mut prompter = ScriptedPrompter::new(&[
            "Analytical Engines Ltd",
            "1842-1843",
            "Programmer",
            "First published algorithm",
            "",
            "Mathematics, Notation",
            "Difference engine",
            "C2",
            "French, Italian",
        ]);

        let profile = collect_user_profile(&mut prompter, full_contact()).unwrap();

        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(
            profile.experiences,
            vec![EmploymentEntry {
                employer: "Analytical Engines Ltd".into(),
                duration: "1842-1843".into(),
                role: "Programmer".into(),
                highlights: "First published algorithm".into(),
            }]
        );
        assert_eq!(profile.skills, vec!["Mathematics", "Notation"]);
        assert_eq!(profile.tools, vec!["Difference engine"]);
        assert_eq!(profile.english_level.as_deref(), Some("C2"));
        assert_eq!(profile.languages, vec!["French", "Italian"]);
        assert!(!prompter.questions.iter().any(|q| q.starts_with("First name")));
    }

    #[test]
    fn missing_fields_are_asked_until_answered() {
        let mut prompter = ScriptedPrompter::new(&[
            "", "  ", "Grace", // first name retried
            "Hopper", "555-0199", "grace@example.com", "Navy", "", // duration retried
            "40 years", "", "", "", "COBOL", "Compilers", "", "Spanish",
        ]);

        let profile = collect_user_profile(&mut prompter, ContactDetails::default()).unwrap();

        assert_eq!(profile.first_name, "Grace");
        assert_eq!(profile.last_name, "Hopper");
        assert_eq!(profile.experiences[0].duration, "40 years");
        assert_eq!(profile.experiences[0].role, "");
        assert_eq!(profile.english_level, None);
        assert_eq!(profile.languages, vec!["Spanish"]);
        assert_eq!(prompter.questions.iter().filter(|q| q.starts_with("First name")).count(), 3);
    }

    #[test]
    fn at_least_one_experience_is_required() {
        let mut prompter = ScriptedPrompter::new(&[
            "", // no employer on the first round
            "Acme", "2 years", "", "", "", "Rust", "Cargo", "B2", "German",
        ]);

        let profile = collect_user_profile(&mut prompter, full_contact()).unwrap();
        assert_eq!(profile.experiences.len(), 1);
        assert!(
            prompter
                .messages
                .iter()
                .any(|m| m == "At least one experience is required.")
        );
    }

    #[test]
    fn prompter_failure_propagates() {
        let mut prompter = ScriptedPrompter::new(&[]);
        let err = collect_user_profile(&mut prompter, ContactDetails::default()).unwrap_err();
        assert!(matches!(err, ResumeKitError::Prompt(_)));
    }
}
