use lazy_regex::regex;

/// Splits a raw detail blob into (duties, requirements).
///
/// Strategies are tried in order, first success wins:
/// 1. four heading/body/heading/body templates anchored at the start;
/// 2. literal split on the requirements heading;
/// 3. character-class split on duty-heading characters (fragments on any
///    composing character, kept as-is);
/// 4. the whole cleaned text as duties.
pub fn split_description(raw: &str) -> (String, String) {
    let cleaned = raw.replace('\r', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return (String::new(), String::new());
    }

    let templates = [
        regex!(
            r"(?si)^([职责描述工作内容岗位职责主要职责]+)[:：]?(.*?)([任职要求岗位要求任职资格要求]+)[:：]?(.*)"
        ),
        regex!(
            r"(?si)^([任职要求岗位要求任职资格要求]+)[:：]?(.*?)([职责描述工作内容岗位职责主要职责]+)[:：]?(.*)"
        ),
        regex!(r"(?si)^([岗位职责工作职责职责描述]+)(.*?)([任职要求岗位要求任职资格]+)(.*)"),
        regex!(r"(?si)^([任职要求岗位要求任职资格]+)(.*?)([岗位职责工作职责职责描述]+)(.*)"),
    ];
    for template in templates {
        if let Some(caps) = template.captures(cleaned) {
            let first_heading = caps.get(1).map_or("", |m| m.as_str());
            let first_body = caps.get(2).map_or("", |m| m.as_str()).trim();
            let second_body = caps.get(4).map_or("", |m| m.as_str()).trim();
            // Only the leading heading group decides the assignment.
            let first_is_duties = first_heading.contains("职责")
                || first_heading.contains("工作")
                || first_heading.contains("岗位");
            return if first_is_duties {
                (first_body.to_string(), second_body.to_string())
            } else {
                (second_body.to_string(), first_body.to_string())
            };
        }
    }

    if cleaned.contains("任职要求") {
        if let Some((head, tail)) = cleaned.split_once("任职要求") {
            let duties = head.replace("职责描述", "").replace("岗位职责", "");
            return (duties.trim().to_string(), tail.trim().to_string());
        }
    }

    if cleaned.contains("岗位职责") || cleaned.contains("工作职责") {
        let parts: Vec<&str> = regex!(r"[岗位职责工作职责职责描述]+")
            .split(cleaned)
            .collect();
        if parts.len() >= 2 {
            let duties = parts[1].trim().to_string();
            let requirements = if parts[0].contains("任职要求") {
                parts[0]
                    .split("任职要求")
                    .last()
                    .unwrap_or("")
                    .trim()
                    .to_string()
            } else {
                String::new()
            };
            return (duties, requirements);
        }
    }

    (cleaned.to_string(), String::new())
}

#[cfg(test)]
mod tests {
    use super::split_description;
    use pretty_assertions::assert_eq;

    #[test]
    fn duties_first_template() {
        let (duties, requirements) = split_description("岗位职责: 开发后端服务 任职要求: 本科及以上");
        assert_eq!(duties, "开发后端服务");
        assert_eq!(requirements, "本科及以上");
    }

    #[test]
    fn heading_swap_keeps_assignment() {
        let (duties, requirements) = split_description("任职要求: 本科及以上 岗位职责: 开发后端服务");
        assert_eq!(duties, "开发后端服务");
        assert_eq!(requirements, "本科及以上");
    }

    #[test]
    fn templates_work_without_colons() {
        let (duties, requirements) = split_description("岗位职责开发服务任职要求本科");
        assert_eq!(duties, "开发服务");
        assert_eq!(requirements, "本科");
    }

    #[test]
    fn multiline_bodies_are_captured() {
        let text = "工作内容：\n1. 编写代码\n2. 评审代码\n任职要求：\n1. 三年经验";
        let (duties, requirements) = split_description(text);
        assert_eq!(duties, "1. 编写代码\n2. 评审代码");
        assert_eq!(requirements, "1. 三年经验");
    }

    #[test]
    fn requirements_only_splits_on_literal_keyword() {
        let (duties, requirements) = split_description("负责平台开发 任职要求三年以上经验");
        assert_eq!(duties, "负责平台开发");
        assert_eq!(requirements, "三年以上经验");
    }

    #[test]
    fn literal_split_strips_duty_headings_from_head() {
        let (duties, requirements) = split_description("介绍 岗位职责负责开发 任职要求本科");
        // No template matches (text does not start with a heading), so the
        // literal requirements split applies with heading stripping.
        assert_eq!(duties, "介绍 负责开发");
        assert_eq!(requirements, "本科");
    }

    #[test]
    fn duty_heading_fallback_fragments_on_heading_characters() {
        let (duties, requirements) = split_description("简介 岗位职责 开发工作");
        // Character-class split: "工作" at the end also fragments.
        assert_eq!(duties, "开发");
        assert_eq!(requirements, "");
    }

    #[test]
    fn plain_text_becomes_duties() {
        let (duties, requirements) = split_description("  这是一段没有任何标题的介绍  ");
        assert_eq!(duties, "这是一段没有任何标题的介绍");
        assert_eq!(requirements, "");
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert_eq!(split_description(""), (String::new(), String::new()));
        assert_eq!(split_description(" \r\n "), (String::new(), String::new()));
    }
}
