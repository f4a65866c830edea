use crate::core::CompanyTask;

pub const DESCRIPTION_LENGTH: usize = 200;

pub fn build_prompt(task: &CompanyTask) -> String {
    format!(
        "Provide a concise, {len}-character description of {company} in {country}. \
         Include all relevant industry categories based on the company's activities. \
         Always use the latest information from reputable web sources. \
         The output must be exactly in this format, with nothing extra, no explanations, no greetings, no filler:\n\n\
         \"{len}-character description\" | [Relevant categories]",
        len = DESCRIPTION_LENGTH,
        company = task.company,
        country = task.country,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_company_and_format() {
        let task = CompanyTask {
            ordinal: 1,
            country: "Argentina".to_string(),
            company: "Alpha Corp".to_string(),
        };
        let prompt = build_prompt(&task);

        assert!(prompt.contains("200-character description of Alpha Corp in Argentina"));
        assert!(prompt.contains("industry categories"));
        assert!(prompt.ends_with("\"200-character description\" | [Relevant categories]"));
        assert!(prompt.contains("no explanations"));
    }
}
