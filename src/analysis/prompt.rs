/// Instruction prompt and structured-output schema sent with every image
use serde_json::{json, Value};

/// Every field the model must return, in schema order
pub const REQUIRED_FIELDS: [&str; 9] = [
    "isPersonalityTest",
    "testType",
    "overallTitle",
    "summary",
    "traits",
    "strengths",
    "growthAreas",
    "interpersonalAdvice",
    "careerAdvice",
];

/// Build the instruction prompt for the given report language
pub fn instruction(language: &str) -> String {
    format!(
        "你是一位顶级心理学家，精通 DISC、MBTI、九型人格、大五人格等主流性格测评体系。\n\
         请按以下步骤处理这张图片：\n\
         1. 判断它是否为性格测评结果截图（包含测评维度、分数、百分比或类型代码）。\n\
         2. 如果是，将 isPersonalityTest 设为 true，在 testType 中写明测评体系，\
         并生成一份具体、有深度、拒绝平庸套话的心理分析报告。\n\
         3. 如果不是，将 isPersonalityTest 设为 false，其余文本字段留空字符串，列表字段留空数组。\n\
         输出语言：{}。",
        language
    )
}

/// Gemini `responseSchema` declaring the report shape
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "isPersonalityTest": {
                "type": "BOOLEAN",
                "description": "图片是否为性格测评结果。包含测评维度、分数或类型代码即为 true。"
            },
            "testType": {
                "type": "STRING",
                "description": "测评体系名称，例如 DISC、MBTI、九型人格、大五人格。"
            },
            "overallTitle": {
                "type": "STRING",
                "description": "一个富有启发性的性格标签（如：睿智的战略家）。"
            },
            "summary": {
                "type": "STRING",
                "description": "300字以上的深度性格画像。分析个体的核心动机和心理特质。"
            },
            "traits": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "8 项具体的行为特质。描述表现及潜在影响。"
            },
            "strengths": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "基于测评结果组合的独特优势。"
            },
            "growthAreas": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "深刻的自我局限分析与改进建议。"
            },
            "interpersonalAdvice": {
                "type": "STRING",
                "description": "针对性的人际沟通指南。"
            },
            "careerAdvice": {
                "type": "STRING",
                "description": "职业生涯的中长期建议。"
            }
        },
        "required": REQUIRED_FIELDS,
        "propertyOrdering": REQUIRED_FIELDS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_names_language_and_flag() {
        let prompt = instruction("English");
        assert!(prompt.contains("输出语言：English"));
        assert!(prompt.contains("isPersonalityTest"));
    }

    #[test]
    fn test_schema_declares_every_field() {
        let schema = response_schema();
        let properties = schema["properties"].as_object().unwrap();

        assert_eq!(properties.len(), REQUIRED_FIELDS.len());
        for field in REQUIRED_FIELDS {
            assert!(properties.contains_key(field), "missing {}", field);
        }
        assert_eq!(schema["required"].as_array().unwrap().len(), REQUIRED_FIELDS.len());
    }

    #[test]
    fn test_schema_types() {
        let schema = response_schema();
        assert_eq!(schema["properties"]["isPersonalityTest"]["type"], "BOOLEAN");
        assert_eq!(schema["properties"]["summary"]["type"], "STRING");
        assert_eq!(schema["properties"]["traits"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["traits"]["items"]["type"], "STRING");
    }
}
