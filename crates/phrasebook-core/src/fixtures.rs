use phrasebook_types::{PhraseCategory, PhraseEntry};

use crate::index::PhraseIndex;

pub(crate) fn entry(
    id: &str,
    zh: &str,
    ko: &str,
    romanization: &str,
    category: PhraseCategory,
) -> PhraseEntry {
    PhraseEntry {
        id: id.to_string(),
        primary_text: zh.to_string(),
        secondary_text: ko.to_string(),
        secondary_pronunciation: romanization.to_string(),
        category,
    }
}

/// Small catalog covering every category, in catalog order
pub(crate) fn sample_entries() -> Vec<PhraseEntry> {
    use PhraseCategory::*;

    vec![
        entry("greeting_01", "你好", "안녕하세요", "annyeonghaseyo", Greeting),
        entry("greeting_02", "谢谢", "감사합니다", "gamsahamnida", Greeting),
        entry("greeting_03", "你好吗？", "잘 지내세요?", "jal jinaeseyo?", Greeting),
        entry("shopping_01", "多少钱？", "얼마예요?", "eolmayeyo?", Shopping),
        entry("shopping_02", "太贵了", "너무 비싸요", "neomu bissayo", Shopping),
        entry("restaurant_01", "请问这个多少钱？", "이거 얼마예요?", "igeo eolmayeyo?", Restaurant),
        entry("emergency_01", "救命！", "살려주세요!", "", Emergency),
        entry(
            "transportation_01",
            "地铁站在哪里？",
            "지하철역 어디예요?",
            "jihacheollyeok eodiyeyo?",
            Transportation,
        ),
        entry("accommodation_01", "我要办理入住", "체크인할게요", "chekeuinhalgeyo", Accommodation),
    ]
}

pub(crate) fn sample_index() -> PhraseIndex {
    PhraseIndex::build(sample_entries())
}
