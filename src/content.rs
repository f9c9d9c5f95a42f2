//! Portfolio content revealed by interactive blocks
//!
//! Blocks carry only a payload key; the catalog turns it into data. Lookup
//! is total: unknown keys come back as [`Content::Missing`] and the
//! presentation layer decides what to show instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::levels::BlockKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub description: String,
    /// Proficiency, 0-100
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub title: String,
    pub description: String,
    pub github: String,
    pub live: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementInfo {
    pub title: String,
    pub description: String,
}

/// Result of a catalog lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Content<'a> {
    Fact(&'a str),
    Skill { name: &'a str, info: &'a SkillInfo },
    Project(&'a ProjectInfo),
    Achievement(&'a AchievementInfo),
    /// No entry for this payload under this block kind
    Missing { kind: BlockKind, payload: &'a str },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub facts: HashMap<String, String>,
    pub skills: HashMap<String, SkillInfo>,
    pub projects: HashMap<String, ProjectInfo>,
    pub achievements: HashMap<String, AchievementInfo>,
}

impl Catalog {
    pub fn lookup<'a>(&'a self, kind: BlockKind, payload: &'a str) -> Content<'a> {
        let found = match kind {
            BlockKind::Question => self.facts.get(payload).map(|f| Content::Fact(f)),
            BlockKind::Skill => self
                .skills
                .get_key_value(payload)
                .map(|(name, info)| Content::Skill { name, info }),
            BlockKind::Project => self.projects.get(payload).map(Content::Project),
            BlockKind::Trophy => self.achievements.get(payload).map(Content::Achievement),
        };
        found.unwrap_or(Content::Missing { kind, payload })
    }

    /// The stock portfolio entries
    pub fn builtin() -> Self {
        let facts = [
            (
                "intro",
                "Hi, I'm Swarup! A developer who enjoys building things for the web and breaking them to learn how they work.",
            ),
            (
                "education",
                "Computer science student with a workshop certificate in cyber security from IIT Kharagpur.",
            ),
            (
                "interests",
                "Outside of code: game design, pixel art and security CTFs.",
            ),
        ];

        let skills = [
            (
                "Python",
                "Expert in Python programming with experience in web development, automation, and data analysis. Proficient with Django, Flask, and various Python libraries.",
                85,
            ),
            (
                "JavaScript",
                "Strong JavaScript skills with experience in modern frameworks and libraries. Experienced in both frontend and backend development.",
                80,
            ),
            (
                "CSS",
                "Advanced CSS skills including modern layouts, animations, and responsive design. Expert in CSS Grid, Flexbox, and preprocessors.",
                90,
            ),
            (
                "HTML",
                "Semantic HTML5 markup with accessibility best practices. Strong foundation in web standards and SEO principles.",
                95,
            ),
            (
                "Web Dev",
                "Full-stack web development experience with modern tools and frameworks. Skilled in creating responsive, user-friendly applications.",
                85,
            ),
            (
                "Security",
                "Cybersecurity knowledge gained from IIT Kharagpur workshop. Understanding of security best practices and defensive techniques.",
                75,
            ),
        ];

        let projects = [
            (
                "project1",
                "Portfolio Website",
                "Interactive portfolio website built with HTML, CSS, and JavaScript. Features responsive design and modern UI elements.",
                "https://github.com/swarup-kumar-jena/portfolio",
                "https://swarup-kumar-jena.github.io/portfolio",
            ),
            (
                "project2",
                "Security Scanner",
                "Python-based security scanning tool that identifies common vulnerabilities in web applications.",
                "https://github.com/swarup-kumar-jena/security-scanner",
                "#",
            ),
            (
                "project3",
                "Game Project",
                "2D platformer game built with JavaScript and Canvas API. Features physics, animations, and multiple levels.",
                "https://github.com/swarup-kumar-jena/game-project",
                "https://swarup-kumar-jena.github.io/game-project",
            ),
        ];

        let achievements = [
            (
                "iit-cert",
                "IIT Kharagpur Cyber Security Workshop",
                "Successfully completed the Cyber Security Workshop conducted by IIT Kharagpur. Gained valuable insights into security best practices, defensive techniques, and modern cybersecurity challenges.",
            ),
            (
                "coding-badge",
                "Code Master",
                "Achieved over 1000 hours of coding experience across various projects and learning modules. Demonstrates dedication to continuous learning and skill development.",
            ),
            (
                "web-dev",
                "Web Development Pro",
                "Completed 5 major web development projects showcasing proficiency in modern web technologies, responsive design, and user experience principles.",
            ),
        ];

        Self {
            facts: facts
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            skills: skills
                .into_iter()
                .map(|(name, description, level)| {
                    (
                        name.to_string(),
                        SkillInfo {
                            description: description.to_string(),
                            level,
                        },
                    )
                })
                .collect(),
            projects: projects
                .into_iter()
                .map(|(id, title, description, github, live)| {
                    (
                        id.to_string(),
                        ProjectInfo {
                            title: title.to_string(),
                            description: description.to_string(),
                            github: github.to_string(),
                            live: live.to_string(),
                        },
                    )
                })
                .collect(),
            achievements: achievements
                .into_iter()
                .map(|(id, title, description)| {
                    (
                        id.to_string(),
                        AchievementInfo {
                            title: title.to_string(),
                            description: description.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelSet;

    #[test]
    fn test_lookup_skill() {
        let catalog = Catalog::builtin();
        match catalog.lookup(BlockKind::Skill, "CSS") {
            Content::Skill { name, info } => {
                assert_eq!(name, "CSS");
                assert_eq!(info.level, 90);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_lookup_respects_kind() {
        let catalog = Catalog::builtin();
        // A project key looked up as a trophy is missing, not a project
        assert_eq!(
            catalog.lookup(BlockKind::Trophy, "project1"),
            Content::Missing {
                kind: BlockKind::Trophy,
                payload: "project1"
            }
        );
    }

    #[test]
    fn test_unknown_payload_is_missing() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.lookup(BlockKind::Skill, "Rust"),
            Content::Missing { .. }
        ));
    }

    #[test]
    fn test_every_builtin_block_has_content() {
        let catalog = Catalog::builtin();
        for level in LevelSet::builtin().iter() {
            for block in &level.blocks {
                let content = catalog.lookup(block.kind, &block.payload);
                assert!(
                    !matches!(content, Content::Missing { .. }),
                    "{} has no content for {:?} {}",
                    level.name,
                    block.kind,
                    block.payload
                );
            }
        }
    }
}
