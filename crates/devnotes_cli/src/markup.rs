//! Markup produced by the shell's editing commands.

/// Toolbar formatting commands available in note editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Highlight,
    BulletList,
    NumberedList,
    CodeBlock,
}

impl Format {
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "underline" => Some(Self::Underline),
            "highlight" => Some(Self::Highlight),
            "bullets" => Some(Self::BulletList),
            "numbered" => Some(Self::NumberedList),
            "code" => Some(Self::CodeBlock),
            _ => None,
        }
    }

    /// Block of markup for `text`. List items are separated by `;`.
    pub fn render(self, text: &str) -> String {
        let text = text.trim();
        match self {
            Self::Bold => format!("<p><b>{}</b></p>", escape(text)),
            Self::Italic => format!("<p><i>{}</i></p>", escape(text)),
            Self::Underline => format!("<p><u>{}</u></p>", escape(text)),
            Self::Highlight => format!(
                "<p><span style=\"background-color: #ffff00;\">{}</span></p>",
                escape(text)
            ),
            Self::BulletList => format!("<ul>{}</ul>", list_items(text)),
            Self::NumberedList => format!("<ol>{}</ol>", list_items(text)),
            Self::CodeBlock => format!("<pre>{}</pre>", escape(text)),
        }
    }
}

/// Plain typed text as a paragraph.
pub fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", escape(text.trim()))
}

fn list_items(text: &str) -> String {
    text.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
