//! Heuristic segmentation of free-form text into a [`ResumeRecord`].
//!
//! One pass over the trimmed, non-empty lines classifies each line as a
//! skills heading, a skills continuation, an experience bullet, or summary
//! prose. Once a skills heading has been seen the skills block stays open
//! for the rest of the input, so later bullets and comma lists are read as
//! skills.

use resumekit_shared::ResumeRecord;

/// Lower-cased prefixes that open the skills block.
const SKILLS_HEADINGS: &[&str] = &["skills", "skill:", "skills:"];

/// Characters that mark a bullet line.
const BULLET_MARKERS: [char; 2] = ['-', '*'];

/// Segment `text` into summary, skills, and experience bullets.
///
/// Total and pure: every input, including the empty string, yields a
/// record, and the same input always yields the same record.
pub fn segment(text: &str) -> ResumeRecord {
    let mut summary_lines: Vec<&str> = Vec::new();
    let mut skills: Vec<String> = Vec::new();
    let mut experiences: Vec<String> = Vec::new();
    let mut in_skills = false;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_skills_heading(line) {
            in_skills = true;
            if let Some((_, rest)) = line.split_once(':') {
                skills.extend(split_list(rest));
            }
            continue;
        }

        let bullet = is_bullet(line);

        if in_skills && (bullet || line.contains(',')) {
            if bullet {
                skills.push(strip_bullet(line).to_string());
            } else {
                skills.extend(split_list(line));
            }
            continue;
        }

        if bullet {
            experiences.push(strip_bullet(line).to_string());
            continue;
        }

        summary_lines.push(line);
    }

    // ResumeRecord drops the empty items and duplicates.
    ResumeRecord::new(summary_lines.join(" ").trim(), skills, experiences)
}

fn is_skills_heading(line: &str) -> bool {
    let lower = line.to_lowercase();
    SKILLS_HEADINGS.iter().any(|h| lower.starts_with(h))
}

fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLET_MARKERS)
}

/// Remove the leading run of bullet markers and spaces.
fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(|c: char| c == ' ' || BULLET_MARKERS.contains(&c))
        .trim()
}

fn split_list(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
