//! Structured content as returned by the text generator, and its conversion into
//! renderable [`Document`]s.

mod markdown;

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::Error;
use crate::model::{Body, Document, Entry, Header, Section};

pub use markdown::parse_markdown;

/// Generators emit `null` for fields they had nothing for; treat that like a missing key.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedContent {
    pub resume: Option<ResumeSource>,
    pub cover_letter: Option<CoverLetterSource>,
    #[serde(deserialize_with = "null_as_default")]
    pub interview_answers: Vec<InterviewAnswer>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResumeSource {
    /// Markdown-formatted resume text.
    Markdown(String),
    Structured(Resume),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CoverLetterSource {
    Text(String),
    Structured(CoverLetter),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub graduation_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverLetter {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipient: String,
    #[serde(deserialize_with = "null_as_default")]
    pub salutation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(deserialize_with = "null_as_default")]
    pub closing: String,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewAnswer {
    #[serde(deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(deserialize_with = "null_as_default")]
    pub answer: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    CoverLetter,
    InterviewAnswers,
}

impl DocumentKind {
    pub fn file_stem(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover-letter",
            DocumentKind::InterviewAnswers => "interview-answers",
        }
    }
}

/// `start – end`, or whichever half is present.
fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} \u{2013} {e}"),
    }
}

impl Resume {
    pub fn to_document(&self) -> Document {
        let c = &self.contact;
        let details: Vec<String> = [&c.email, &c.phone, &c.location]
            .into_iter()
            .chain(c.links.iter())
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();

        let experience = self
            .experience
            .iter()
            .map(|e| Entry {
                heading: e.title.clone(),
                heading_aside: date_range(&e.start_date, &e.end_date),
                subheading: e.company.clone(),
                subheading_aside: e.location.clone(),
                bullets: e.highlights.clone(),
            })
            .collect();
        let projects = self
            .projects
            .iter()
            .map(|p| Entry {
                heading: p.name.clone(),
                heading_aside: p.date.clone(),
                subheading: p.description.clone(),
                subheading_aside: p.link.clone(),
                bullets: p.highlights.clone(),
            })
            .collect();
        let education = self
            .education
            .iter()
            .map(|e| Entry {
                heading: e.degree.clone(),
                heading_aside: e.graduation_date.clone(),
                subheading: e.institution.clone(),
                subheading_aside: e.location.clone(),
                bullets: e.details.clone(),
            })
            .collect();

        Document {
            title: if self.name.trim().is_empty() {
                "Resume".to_string()
            } else {
                format!("{} - Resume", self.name.trim())
            },
            header: Some(Header {
                name: self.name.trim().to_string(),
                details,
            }),
            sections: vec![
                Section::new(Some("Summary"), Body::Text(self.summary.clone())),
                Section::new(Some("Experience"), Body::Entries(experience)),
                Section::new(Some("Projects"), Body::Entries(projects)),
                Section::new(Some("Education"), Body::Entries(education)),
                Section::new(Some("Skills"), Body::List(self.skills.clone())).in_sidebar(),
                Section::new(Some("Certifications"), Body::List(self.certifications.clone()))
                    .in_sidebar(),
            ],
        }
    }
}

impl CoverLetter {
    /// `date` fills in when the letter carries none.
    pub fn to_document(&self, date: Option<&str>) -> Document {
        let date = if self.date.trim().is_empty() {
            date.unwrap_or_default()
        } else {
            self.date.as_str()
        };
        let closing = [self.closing.trim(), self.signature.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let text = |s: &str| Section::new(None, Body::Text(s.trim().to_string()));
        Document {
            title: "Cover Letter".to_string(),
            header: None,
            sections: vec![
                text(date),
                text(&self.recipient),
                text(&self.salutation),
                text(&self.body),
                text(&closing),
            ],
        }
    }
}

impl CoverLetterSource {
    pub fn to_document(&self, date: Option<&str>) -> Document {
        match self {
            CoverLetterSource::Structured(letter) => letter.to_document(date),
            CoverLetterSource::Text(text) => {
                let mut doc = Document {
                    title: "Cover Letter".to_string(),
                    header: None,
                    sections: Vec::new(),
                };
                if let Some(date) = date {
                    doc.sections.push(Section::new(None, Body::Text(date.to_string())));
                }
                doc.sections.push(Section::new(
                    None,
                    Body::Text(markdown::strip_emphasis(text.trim())),
                ));
                doc
            }
        }
    }
}

impl ResumeSource {
    pub fn to_document(&self) -> Document {
        match self {
            ResumeSource::Markdown(text) => {
                let mut doc = parse_markdown(text);
                doc.title = match &doc.header {
                    Some(h) if !h.name.is_empty() => format!("{} - Resume", h.name),
                    _ => "Resume".to_string(),
                };
                doc
            }
            ResumeSource::Structured(resume) => resume.to_document(),
        }
    }
}

pub fn interview_document(answers: &[InterviewAnswer]) -> Document {
    Document {
        title: "Interview Answers".to_string(),
        header: Some(Header {
            name: "Interview Answers".to_string(),
            details: Vec::new(),
        }),
        sections: answers
            .iter()
            .filter(|a| !a.question.trim().is_empty() || !a.answer.trim().is_empty())
            .map(|a| Section::new(Some(a.question.trim()), Body::Text(a.answer.trim().to_string())))
            .collect(),
    }
}

impl GeneratedContent {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| match e {
            Error::InvalidContent(msg) => Error::InvalidContent(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Every document present, in resume / cover letter / interview order.
    pub fn documents(&self, date: Option<&str>) -> Vec<(DocumentKind, Document)> {
        let mut docs = Vec::new();
        if let Some(resume) = &self.resume {
            docs.push((DocumentKind::Resume, resume.to_document()));
        }
        if let Some(letter) = &self.cover_letter {
            docs.push((DocumentKind::CoverLetter, letter.to_document(date)));
        }
        if !self.interview_answers.is_empty() {
            docs.push((
                DocumentKind::InterviewAnswers,
                interview_document(&self.interview_answers),
            ));
        }
        docs
    }
}
