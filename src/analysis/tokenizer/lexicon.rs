//! Lexicon-based tagging and the built-in Thai lexicon.
//!
//! [`LexiconTagger`] looks each word up in a word → tag table and falls
//! back to a default category for words it does not know. Tags use the
//! ORCHID tag set.

use ahash::AHashMap;

use crate::analysis::token::{TAG_NOUN_COMMON, TaggedToken};
use crate::error::Result;

use super::Tagger;

/// Common Thai words with their ORCHID tags.
///
/// Covers frequent function words (so they tag as something other than a
/// noun and drop out of POS filtering) and a general-purpose vocabulary.
pub const BUILTIN_THAI_LEXICON: &[(&str, &str)] = &[
    // function words
    ("ที่", "PREL"),
    ("ซึ่ง", "PREL"),
    ("และ", "JCRG"),
    ("หรือ", "JCRG"),
    ("แต่", "JCRG"),
    ("ก็", "JSBR"),
    ("ว่า", "JSBR"),
    ("ให้", "JSBR"),
    ("เพื่อ", "JSBR"),
    ("ถ้า", "JSBR"),
    ("ของ", "RPRE"),
    ("ใน", "RPRE"),
    ("กับ", "RPRE"),
    ("จาก", "RPRE"),
    ("โดย", "RPRE"),
    ("แก่", "RPRE"),
    ("จะ", "XVBM"),
    ("ยัง", "XVBM"),
    ("ได้", "XVAE"),
    ("อยู่", "XVAE"),
    ("แล้ว", "XVAE"),
    ("ไป", "XVAE"),
    ("มา", "XVAE"),
    ("ต้อง", "XVMM"),
    ("ควร", "XVMM"),
    ("ไม่", "NEG"),
    ("นี้", "DDAC"),
    ("นั้น", "DDAC"),
    ("ทุก", "DIAQ"),
    ("หลาย", "DIAQ"),
    ("ผม", "PPRS"),
    ("ฉัน", "PPRS"),
    ("เรา", "PPRS"),
    ("เขา", "PPRS"),
    ("คุณ", "PPRS"),
    ("ท่าน", "PPRS"),
    ("ครับ", "EAFF"),
    ("ค่ะ", "EAFF"),
    ("มาก", "ADVN"),
    ("ด้วย", "ADVN"),
    ("การ", "FIXN"),
    ("ความ", "FIXN"),
    ("เป็น", "VSTA"),
    ("มี", "VSTA"),
    ("คือ", "VSTA"),
    // nouns
    ("แมว", "NCMN"),
    ("หมา", "NCMN"),
    ("ปลา", "NCMN"),
    ("บ้าน", "NCMN"),
    ("คน", "NCMN"),
    ("ประเทศ", "NCMN"),
    ("ไทย", "NPRP"),
    ("ประเทศไทย", "NPRP"),
    ("วัฒนธรรม", "NCMN"),
    ("อาหาร", "NCMN"),
    ("ภาษา", "NCMN"),
    ("ภาษาไทย", "NCMN"),
    ("เรื่อง", "NCMN"),
    ("ประโยชน์", "NCMN"),
    ("เทคโนโลยี", "NCMN"),
    ("ชีวิต", "NCMN"),
    ("โรงเรียน", "NCMN"),
    ("นักเรียน", "NCMN"),
    ("ครู", "NCMN"),
    ("หนังสือ", "NCMN"),
    ("เวลา", "NCMN"),
    ("วัน", "NCMN"),
    ("ปี", "NCMN"),
    ("งาน", "NCMN"),
    ("เงิน", "NCMN"),
    ("น้ำ", "NCMN"),
    ("ข้าว", "NCMN"),
    ("รถ", "NCMN"),
    ("ถนน", "NCMN"),
    ("เมือง", "NCMN"),
    ("โลก", "NCMN"),
    ("ข้อมูล", "NCMN"),
    ("ระบบ", "NCMN"),
    ("ปัญหา", "NCMN"),
    ("ข่าว", "NCMN"),
    ("รัฐบาล", "NCMN"),
    ("รัฐสภา", "NCMN"),
    ("สภา", "NCMN"),
    ("กฎหมาย", "NCMN"),
    ("ประชาชน", "NCMN"),
    ("งบประมาณ", "NCMN"),
    ("นายกรัฐมนตรี", "NCMN"),
    ("สมาชิก", "NCMN"),
    ("เศรษฐกิจ", "NCMN"),
    ("การศึกษา", "NCMN"),
    ("สุขภาพ", "NCMN"),
    ("ธรรมชาติ", "NCMN"),
    ("กรุงเทพ", "NPRP"),
    // verbs
    ("กิน", "VACT"),
    ("นอน", "VACT"),
    ("เดิน", "VACT"),
    ("วิ่ง", "VACT"),
    ("พูด", "VACT"),
    ("อ่าน", "VACT"),
    ("เขียน", "VACT"),
    ("เรียน", "VACT"),
    ("สอน", "VACT"),
    ("ทำ", "VACT"),
    ("ทำงาน", "VACT"),
    ("ทำให้", "VACT"),
    ("ช่วย", "VACT"),
    ("เข้าใจ", "VACT"),
    ("ใช้", "VACT"),
    ("ซื้อ", "VACT"),
    ("ขาย", "VACT"),
    ("ประชุม", "VACT"),
    ("อภิปราย", "VACT"),
    ("พัฒนา", "VACT"),
    ("เห็น", "VACT"),
    ("รู้", "VACT"),
    ("คิด", "VACT"),
    ("ขึ้น", "VACT"),
    ("ชอบ", "VSTA"),
    ("รัก", "VSTA"),
    ("ต้องการ", "VSTA"),
    // attributive verbs
    ("สวยงาม", "VATT"),
    ("หลากหลาย", "VATT"),
    ("อร่อย", "VATT"),
    ("สำคัญ", "VATT"),
    ("ใหม่", "VATT"),
    ("สะดวก", "VATT"),
    ("ดี", "VATT"),
    ("ใหญ่", "VATT"),
    ("เล็ก", "VATT"),
];

/// Tagger backed by a word → tag table.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    tags: AHashMap<String, String>,
    unknown_tag: String,
}

impl LexiconTagger {
    /// Create a tagger from `(word, tag)` pairs. Later pairs override
    /// earlier ones for the same word.
    pub fn new<I, W, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, T)>,
        W: Into<String>,
        T: Into<String>,
    {
        LexiconTagger {
            tags: entries
                .into_iter()
                .map(|(w, t)| (w.into(), t.into()))
                .collect(),
            unknown_tag: TAG_NOUN_COMMON.to_string(),
        }
    }

    /// Tagger over [`BUILTIN_THAI_LEXICON`].
    pub fn builtin() -> Self {
        Self::new(BUILTIN_THAI_LEXICON.iter().copied())
    }

    /// Category given to words missing from the table.
    pub fn with_unknown_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.unknown_tag = tag.into();
        self
    }

    /// Words known to this tagger.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// Tag for a single word.
    pub fn lookup(&self, word: &str) -> &str {
        self.tags
            .get(word)
            .map(String::as_str)
            .unwrap_or(self.unknown_tag.as_str())
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, words: &[String]) -> Result<Vec<TaggedToken>> {
        Ok(words
            .iter()
            .map(|word| TaggedToken::new(word.as_str(), self.lookup(word)))
            .collect())
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_words() {
        let tagger = LexiconTagger::builtin();
        let words = vec!["แมว".to_string(), "กิน".to_string(), "สุนัข".to_string()];
        let tokens = tagger.tag(&words).unwrap();

        assert_eq!(tokens[0], TaggedToken::new("แมว", "NCMN"));
        assert_eq!(tokens[1], TaggedToken::new("กิน", "VACT"));
        assert_eq!(tokens[2], TaggedToken::new("สุนัข", "NCMN"));
    }

    #[test]
    fn test_custom_unknown_tag() {
        let tagger = LexiconTagger::new([("a", "X")]).with_unknown_tag("UNK");
        assert_eq!(tagger.lookup("a"), "X");
        assert_eq!(tagger.lookup("b"), "UNK");
    }

    #[test]
    fn test_builtin_has_no_empty_entries() {
        for (word, tag) in BUILTIN_THAI_LEXICON {
            assert!(!word.is_empty());
            assert!(!tag.is_empty());
        }
    }
}
