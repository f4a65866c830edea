//! 輸入檔解析：國家標題行以冒號結尾，其後的行包含 `<數字>-<公司名稱>` 條目。
//!
//! ```text
//! Argentina:
//! 1- Alpha Corp 2- Beta Inc
//! 3- Gamma SA
//! ```

use crate::core::{CountrySection, ParsedCatalog, Storage};
use crate::utils::error::{InfosearchError, Result};

/// 透過 Storage 讀取並解析輸入檔
pub async fn load_catalog<S: Storage>(storage: &S, path: &str) -> Result<ParsedCatalog> {
    let bytes = storage.read_file(path).await?;
    let content = String::from_utf8(bytes).map_err(|e| InfosearchError::ProcessingError {
        message: format!("Input file '{}' is not valid UTF-8: {}", path, e),
    })?;

    let catalog = parse_catalog(&content);
    tracing::debug!(
        "Parsed {} countries with {} companies from {}",
        catalog.sections.len(),
        catalog.company_count(),
        path
    );
    Ok(catalog)
}

pub fn parse_catalog(content: &str) -> ParsedCatalog {
    let mut sections = Vec::new();
    let mut current: Option<CountrySection> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_suffix(':') {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            // 空白國名的標題不開新區段，其下的公司行與第一個標題前的行一樣忽略
            let country = header.trim();
            current = (!country.is_empty()).then(|| CountrySection {
                country: country.to_string(),
                companies: Vec::new(),
            });
        } else if let Some(section) = current.as_mut() {
            section.companies.extend(company_entries(line));
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    ParsedCatalog { sections }
}

/// 從一行中取出所有公司條目。
///
/// 條目標記是一串數字後接 `-`，名稱延伸到下一個標記或行尾。
/// 數字依 `char::is_numeric` 判斷，所以 `١-` 這類非 ASCII 數字也算標記。
/// 名稱中出現不屬於標記的數字時，該標記作廢，從下一個字元繼續掃描。
pub fn company_entries(line: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while let Some(current) = line[pos..].chars().next() {
        let Some(start) = marker_end(line, pos) else {
            pos += current.len_utf8();
            continue;
        };

        match entry_end(line, start) {
            Some(end) => {
                let name = line[start..end].trim();
                if !name.is_empty() {
                    entries.push(name.to_string());
                }
                pos = end;
            }
            None => pos += current.len_utf8(),
        }
    }

    entries
}

// pos 必須落在字元邊界上；回傳的索引也一定在字元邊界上
fn marker_end(line: &str, pos: usize) -> Option<usize> {
    let rest = &line[pos..];
    let digits: usize = rest
        .chars()
        .take_while(|c| c.is_numeric())
        .map(char::len_utf8)
        .sum();

    if digits > 0 && rest[digits..].starts_with('-') {
        Some(pos + digits + 1)
    } else {
        None
    }
}

fn entry_end(line: &str, start: usize) -> Option<usize> {
    match line[start..].char_indices().find(|(_, c)| c.is_numeric()) {
        Some((offset, _)) => {
            let at = start + offset;
            marker_end(line, at).map(|_| at)
        }
        None => Some(line.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_country_with_inline_entries() {
        let catalog = parse_catalog("Argentina:\n1- Alpha Corp 2- Beta Inc\n");

        assert_eq!(catalog.countries(), vec!["Argentina"]);
        assert_eq!(catalog.sections[0].companies, vec!["Alpha Corp", "Beta Inc"]);
    }

    #[test]
    fn test_header_without_companies_is_kept() {
        let catalog = parse_catalog("Argentina:\nBrazil:\n1- Vale\n\nChile:\n");

        assert_eq!(catalog.countries(), vec!["Argentina", "Brazil", "Chile"]);
        assert!(catalog.sections[0].companies.is_empty());
        assert_eq!(catalog.sections[1].companies, vec!["Vale"]);
        assert!(catalog.sections[2].companies.is_empty());
    }

    #[test]
    fn test_lines_before_first_header_are_ignored() {
        let catalog = parse_catalog("1- Orphan Ltd\nnotes\nPeru:\n1- Backus\n");

        assert_eq!(catalog.sections.len(), 1);
        assert_eq!(catalog.sections[0].companies, vec!["Backus"]);
    }

    #[test]
    fn test_blank_header_clears_active_country() {
        let catalog = parse_catalog(":\n1- Orphan Ltd\nPeru:\n1- Backus\n");

        assert_eq!(catalog.countries(), vec!["Peru"]);
        assert_eq!(catalog.tasks().len(), 1);
        assert_eq!(catalog.sections[0].companies, vec!["Backus"]);
    }

    #[test]
    fn test_blank_header_closes_previous_section() {
        let catalog = parse_catalog("Peru:\n1- Backus\n   :\n2- Orphan Ltd\nChile:\n1- Falabella\n");

        assert_eq!(catalog.countries(), vec!["Peru", "Chile"]);
        assert_eq!(catalog.sections[0].companies, vec!["Backus"]);
        assert_eq!(catalog.sections[1].companies, vec!["Falabella"]);
    }

    #[test]
    fn test_header_name_is_trimmed() {
        let catalog = parse_catalog("   United States  :   \n  1-   Acme   \n");

        assert_eq!(catalog.countries(), vec!["United States"]);
        assert_eq!(catalog.sections[0].companies, vec!["Acme"]);
    }

    #[test]
    fn test_entries_across_multiple_lines() {
        let catalog = parse_catalog("Mexico:\n1- Cemex\n2- Bimbo 3- Femsa\n\n4- Televisa\n");

        assert_eq!(
            catalog.sections[0].companies,
            vec!["Cemex", "Bimbo", "Femsa", "Televisa"]
        );
        assert_eq!(catalog.tasks().len(), 4);
    }

    #[test]
    fn test_missing_dash_yields_no_entries() {
        assert!(company_entries("1 Alpha Corp").is_empty());
        assert!(company_entries("Alpha Corp").is_empty());
    }

    #[test]
    fn test_trailing_whitespace_and_spacing_around_dash() {
        assert_eq!(company_entries("1-Alpha   "), vec!["Alpha"]);
        assert_eq!(company_entries("1 - Alpha"), Vec::<String>::new());
        assert_eq!(company_entries("10-  Alpha  11-Beta"), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_empty_company_names_are_dropped() {
        assert!(company_entries("1-").is_empty());
        assert!(company_entries("1-   ").is_empty());
        assert_eq!(company_entries("1- 2- Beta"), vec!["Beta"]);
        assert_eq!(company_entries("1-2- Beta"), vec!["Beta"]);
    }

    #[test]
    fn test_text_before_first_marker_is_skipped() {
        assert_eq!(company_entries("Alpha 1- Beta"), vec!["Beta"]);
    }

    #[test]
    fn test_digit_inside_name_rejects_that_entry() {
        assert!(company_entries("1- 3M Company").is_empty());
        assert_eq!(company_entries("1- Alpha 7 Eleven 2- Beta"), vec!["Beta"]);
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(
            company_entries("1- Société Générale 2- Nestlé"),
            vec!["Société Générale", "Nestlé"]
        );
    }

    #[test]
    fn test_non_ascii_digit_markers() {
        assert_eq!(company_entries("١- Aramco ٢- SABIC"), vec!["Aramco", "SABIC"]);
        assert_eq!(company_entries("१२- Infosys"), vec!["Infosys"]);
        assert!(company_entries("١- Aramco ٣ Holdings").is_empty());
    }

    #[test]
    fn test_task_count_matches_company_count() {
        let catalog = parse_catalog("A:\n1- a 2- b\nB:\nC:\n1- c\n2- d 3- e\n");
        let tasks = catalog.tasks();

        assert_eq!(tasks.len(), catalog.company_count());
        for (index, task) in tasks.iter().enumerate() {
            assert_eq!(task.ordinal, index + 1);
        }
    }
}
