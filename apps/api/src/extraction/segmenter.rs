//! Section Segmenter — splits document text into named sections by header detection.

use crate::evaluation::vocabulary::SECTION_HEADERS;
use crate::extraction::sections::SectionMap;

/// Splits `text` into a [`SectionMap`].
///
/// A trimmed line is a header when, lowercased and stripped of colons, it equals
/// or starts with an entry in [`SECTION_HEADERS`]. Each header owns the lines up
/// to the next header (or end of text). Sections with an empty body are dropped.
/// A header repeated later in the document is not a boundary: the repeated line
/// stays in the body of whatever section is open at that point.
pub fn segment(text: &str) -> SectionMap {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let mut headers: Vec<(usize, String)> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let Some(header) = normalize_header(line) else {
            continue;
        };
        if headers.iter().any(|(_, seen)| *seen == header) {
            continue;
        }
        headers.push((index, header));
    }

    // Each section ends where the next one starts; the last one ends at the sentinel.
    let ends = headers
        .iter()
        .skip(1)
        .map(|(index, _)| *index)
        .chain(std::iter::once(lines.len()));

    let mut sections = SectionMap::new();
    for ((start, header), end) in headers.iter().zip(ends) {
        let body = lines[start + 1..end].join("\n");
        let body = body.trim();
        if body.is_empty() {
            continue;
        }
        sections.insert(header.replace(' ', "_"), body);
    }

    if !sections.contains("skills") {
        if let Some(technical) = sections.get("technical_skills").map(str::to_owned) {
            sections.insert("skills", technical);
        }
    }

    sections
}

/// Returns the normalized header text if `line` is a section header.
fn normalize_header(line: &str) -> Option<String> {
    let lowered = line.to_lowercase();
    let candidate = lowered.trim_matches(':').trim();
    if candidate.is_empty() {
        return None;
    }
    SECTION_HEADERS
        .iter()
        .any(|header| candidate.starts_with(header))
        .then(|| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_and_education_sections() {
        let sections = segment("Skills:\nPython, Go\n\nEducation:\nB.Tech");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("skills"), Some("Python, Go"));
        assert_eq!(sections.get("education"), Some("B.Tech"));
    }

    #[test]
    fn test_no_headers_yields_empty_map() {
        let sections = segment("Jane Doe\njane@example.com\nLoves compilers");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_empty_section_is_dropped() {
        let sections = segment("Summary\n\nSkills\nRust");
        assert!(!sections.contains("summary"));
        assert_eq!(sections.get("skills"), Some("Rust"));
    }

    #[test]
    fn test_multi_word_header_is_underscored() {
        let sections = segment("Work Experience:\nAcme Corp\n2019 - 2023");
        assert_eq!(sections.get("work_experience"), Some("Acme Corp\n2019 - 2023"));
    }

    #[test]
    fn test_header_prefix_match_keeps_full_line_as_name() {
        let sections = segment("Skills & Tools\nDocker");
        assert_eq!(sections.get("skills_&_tools"), Some("Docker"));
    }

    #[test]
    fn test_technical_skills_aliased_to_skills() {
        let sections = segment("Technical Skills:\nKubernetes\nTerraform");
        assert_eq!(sections.get("technical_skills"), Some("Kubernetes\nTerraform"));
        assert_eq!(sections.get("skills"), Some("Kubernetes\nTerraform"));
    }

    #[test]
    fn test_existing_skills_section_is_not_overwritten_by_alias() {
        let sections = segment("Skills\nRust\nTechnical Skills\nGo");
        assert_eq!(sections.get("skills"), Some("Rust"));
        assert_eq!(sections.get("technical_skills"), Some("Go"));
    }

    #[test]
    fn test_duplicate_header_keeps_first_boundaries() {
        let sections = segment("Skills\nRust\nEducation\nBSc\nSkills\nGo");
        assert_eq!(sections.get("skills"), Some("Rust"));
        assert_eq!(sections.get("education"), Some("BSc\nSkills\nGo"));
    }

    #[test]
    fn test_lines_are_trimmed_and_crlf_handled() {
        let sections = segment("  Projects:  \r\n   compiler in Rust   \r\n");
        assert_eq!(sections.get("projects"), Some("compiler in Rust"));
    }

    #[test]
    fn test_jd_headers_are_recognised() {
        let sections = segment("Requirements:\n- Python\n- SQL\nNice to have:\n- Airflow");
        assert_eq!(sections.get("requirements"), Some("- Python\n- SQL"));
        assert_eq!(sections.get("nice_to_have"), Some("- Airflow"));
    }
}
