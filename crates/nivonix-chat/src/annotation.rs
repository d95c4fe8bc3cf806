use serde::{Deserialize, Serialize};

/// Per-file metadata produced by the upload collaborator. Consumed here only
/// to annotate the next user message; it never touches the thread model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub name: String,
    pub size_formatted: String,
    #[serde(default)]
    pub is_image: bool,
    #[serde(default)]
    pub is_document: bool,
    #[serde(default)]
    pub is_archive: bool,
    #[serde(default)]
    pub is_text: bool,
    #[serde(default)]
    pub lines: Option<usize>,
}

impl FileReport {
    fn annotation_line(&self) -> String {
        let mut line = format!("📎 {} ({})", self.name, self.size_formatted);
        if self.is_image {
            line.push_str(" [Image]");
        } else if self.is_document {
            line.push_str(" [Document]");
        } else if self.is_archive {
            line.push_str(" [Archive]");
        } else if self.is_text {
            match self.lines {
                Some(lines) => line.push_str(&format!(" [Text - {} lines]", lines)),
                None => line.push_str(" [Text - unknown lines]"),
            }
        }
        line
    }
}

/// Append a human-readable description of uploaded files to a prompt.
pub fn annotate_prompt(prompt: &str, files: &[FileReport]) -> String {
    if files.is_empty() {
        return prompt.to_string();
    }

    let info = files
        .iter()
        .map(FileReport::annotation_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!("{prompt}\n{info}\n\nPlease analyze these files.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str) -> FileReport {
        FileReport {
            name: name.to_string(),
            size_formatted: "1.2 KB".to_string(),
            is_image: false,
            is_document: false,
            is_archive: false,
            is_text: false,
            lines: None,
        }
    }

    #[test]
    fn test_no_files_leaves_prompt_untouched() {
        assert_eq!(annotate_prompt("hello", &[]), "hello");
    }

    #[test]
    fn test_text_file_annotation_includes_line_count() {
        let mut file = report("notes.txt");
        file.is_text = true;
        file.lines = Some(42);

        let annotated = annotate_prompt("summarize this", &[file]);
        assert!(annotated.starts_with("summarize this\n"));
        assert!(annotated.contains("📎 notes.txt (1.2 KB) [Text - 42 lines]"));
        assert!(annotated.ends_with("Please analyze these files."));
    }

    #[test]
    fn test_image_tag_wins_over_text() {
        let mut file = report("photo.png");
        file.is_image = true;
        file.is_text = true;

        let annotated = annotate_prompt("what is this", &[file]);
        assert!(annotated.contains("[Image]"));
        assert!(!annotated.contains("[Text"));
    }

    #[test]
    fn test_multiple_files_one_line_each() {
        let files = vec![report("a.bin"), report("b.bin")];
        let annotated = annotate_prompt("check these", &files);
        assert!(annotated.contains("📎 a.bin (1.2 KB)\n📎 b.bin (1.2 KB)"));
    }
}
