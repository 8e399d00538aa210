use crate::model::{Body, Document, Entry, Header, Placement, Section};

/// Section titles that belong in a sidebar column when the style has one.
const SIDEBAR_TITLES: [&str; 5] = ["skills", "certifications", "languages", "contact", "tools"];

pub(crate) fn strip_emphasis(line: &str) -> String {
    line.replace("**", "").replace("__", "")
}

fn bullet_text(line: &str) -> Option<&str> {
    ["- ", "* ", "\u{2022} ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

/// Split `text | aside` (or an em/en dash) into its two halves.
fn split_aside(line: &str) -> (String, String) {
    for sep in [" | ", " \u{2014} ", " \u{2013} ", " -- "] {
        if let Some((text, aside)) = line.rsplit_once(sep) {
            return (text.trim().to_string(), aside.trim().to_string());
        }
    }
    (line.trim().to_string(), String::new())
}

enum Pending {
    Empty,
    Text(Vec<String>),
    Entries(Vec<Entry>),
    List(Vec<String>),
}

struct Builder {
    header: Option<Header>,
    sections: Vec<Section>,
    title: Option<String>,
    pending: Pending,
    /// The line after an entry heading is its subheading.
    expect_subheading: bool,
}

impl Builder {
    fn flush(&mut self) {
        let body = match std::mem::replace(&mut self.pending, Pending::Empty) {
            Pending::Empty => None,
            Pending::Text(mut lines) => {
                while lines.last().is_some_and(|l| l.is_empty()) {
                    lines.pop();
                }
                Some(Body::Text(lines.join("\n")))
            }
            Pending::Entries(entries) => Some(Body::Entries(entries)),
            Pending::List(items) => Some(Body::List(items)),
        };
        if let Some(body) = body {
            let title = self.title.take();
            let placement = match &title {
                Some(t) if SIDEBAR_TITLES.iter().any(|s| t.to_lowercase().contains(s)) => {
                    Placement::Sidebar
                }
                _ => Placement::Main,
            };
            self.sections.push(Section {
                title,
                body,
                placement,
            });
        }
        self.expect_subheading = false;
    }

    /// A titled section with no body so far still gets recorded.
    fn start_section(&mut self, title: &str) {
        self.flush();
        if let Some(previous) = self.title.take() {
            self.sections.push(Section::new(Some(&previous), Body::Text(String::new())));
        }
        self.title = Some(title.trim().to_string());
    }

    fn push_entry(&mut self, heading: &str) {
        if !matches!(self.pending, Pending::Entries(_)) {
            self.flush();
            self.pending = Pending::Entries(Vec::new());
        }
        let (heading, heading_aside) = split_aside(heading);
        if let Pending::Entries(entries) = &mut self.pending {
            entries.push(Entry {
                heading,
                heading_aside,
                ..Entry::default()
            });
        }
        self.expect_subheading = true;
    }

    fn push_bullet(&mut self, text: &str) {
        self.expect_subheading = false;
        if let Pending::Entries(entries) = &mut self.pending
            && let Some(entry) = entries.last_mut()
        {
            entry.bullets.push(text.to_string());
            return;
        }
        if !matches!(self.pending, Pending::List(_)) {
            self.flush();
            self.pending = Pending::List(Vec::new());
        }
        if let Pending::List(items) = &mut self.pending {
            items.push(text.to_string());
        }
    }

    fn push_text(&mut self, line: &str) {
        if let Pending::Entries(entries) = &mut self.pending
            && let Some(entry) = entries.last_mut()
        {
            if self.expect_subheading {
                let (sub, aside) = split_aside(line);
                entry.subheading = sub;
                entry.subheading_aside = aside;
                self.expect_subheading = false;
            } else {
                entry.bullets.push(line.to_string());
            }
            return;
        }
        if !matches!(self.pending, Pending::Text(_)) {
            self.flush();
            self.pending = Pending::Text(Vec::new());
        }
        if let Pending::Text(lines) = &mut self.pending {
            lines.push(line.to_string());
        }
    }

    fn push_blank(&mut self) {
        self.expect_subheading = false;
        if let Pending::Text(lines) = &mut self.pending
            && lines.last().is_some_and(|l| !l.is_empty())
        {
            lines.push(String::new());
        }
    }
}

/// Parse markdown-style resume text into a document.
///
/// `# Name` opens the header and the lines under it (up to the first `##`) become
/// contact details. `##` starts a section, `### heading | date` an entry whose next
/// line is `organization | location`. Bullets attach to the current entry, or form a
/// plain list. When the kind of body changes mid-section the rest continues in an
/// untitled section.
pub fn parse_markdown(text: &str) -> Document {
    let mut b = Builder {
        header: None,
        sections: Vec::new(),
        title: None,
        pending: Pending::Empty,
        expect_subheading: false,
    };
    let mut in_header = false;

    for raw in text.lines() {
        let line = strip_emphasis(raw.trim());
        if line.is_empty() {
            b.push_blank();
            continue;
        }
        if line.chars().all(|c| matches!(c, '-' | '=' | '_' | '*')) && line.len() >= 3 {
            continue; // horizontal rule
        }

        if let Some(rest) = line.strip_prefix("### ") {
            in_header = false;
            b.push_entry(rest);
        } else if let Some(rest) = line.strip_prefix("## ") {
            in_header = false;
            b.start_section(rest);
        } else if let Some(rest) = line.strip_prefix("# ") {
            if b.header.is_none() && b.sections.is_empty() && b.title.is_none() {
                b.flush();
                b.header = Some(Header {
                    name: rest.trim().to_string(),
                    details: Vec::new(),
                });
                in_header = true;
            } else {
                in_header = false;
                b.start_section(rest);
            }
        } else if in_header {
            if let Some(header) = b.header.as_mut() {
                header.details.extend(
                    line.split(['|', '\u{2022}'])
                        .map(|d| d.trim().to_string())
                        .filter(|d| !d.is_empty()),
                );
            }
        } else if let Some(item) = bullet_text(&line) {
            b.push_bullet(item);
        } else {
            b.push_text(&line);
        }
    }
    b.flush();
    if let Some(title) = b.title.take() {
        b.sections.push(Section::new(Some(&title), Body::Text(String::new())));
    }

    Document {
        title: String::new(),
        header: b.header,
        sections: b.sections,
    }
}
