//! Study focus for each chapter of St. Luke covered by the curriculum

use super::model::Chapter;

/// Chapter summaries, index 0 is chapter 1
const SUMMARIES: [&str; 12] = [
    "The Annunciation to Zacharias and to Mary: the humility of the Theotokos, the doubt of Zacharias, and the birth of St. John the Forerunner.",
    "The Nativity of Christ: the journey to Bethlehem, the shepherds, the presentation in the Temple, and the twelve-year-old Jesus among the teachers.",
    "The preaching of John the Baptist, the baptism of Jesus, and the genealogy of Christ traced back to Adam.",
    "The temptation of Christ in the wilderness, the start of the ministry in Galilee, and the rejection at Nazareth.",
    "The calling of Peter, James and John, the miraculous catch of fish, and the healing of the leper and the paralytic.",
    "The Lord of the Sabbath, the choosing of the Twelve Apostles, and the Sermon on the Plain with its beatitudes and woes.",
    "The centurion's servant, the widow's son raised at Nain, John the Baptist's question, and the sinful woman who anoints Jesus.",
    "The Parable of the Sower, the calming of the storm, the Gerasene demoniac, and the raising of Jairus's daughter.",
    "The mission of the Twelve, the feeding of the five thousand, the Transfiguration on Mount Tabor, and the cost of discipleship.",
    "The mission of the Seventy, the Parable of the Good Samaritan, and Martha and Mary with the one thing needful.",
    "The Lord's Prayer, further teaching on prayer, the sign of Jonah, and the lamp of the body.",
    "Warnings against hypocrisy and greed, the Parable of the Rich Fool, freedom from anxiety, and readiness for the Master's return.",
];

/// Summary for a chapter number, or an empty string when the chapter is not in the curriculum
pub fn lookup(number: u8) -> &'static str {
    usize::from(number).checked_sub(1).and_then(|i| SUMMARIES.get(i)).copied().unwrap_or("")
}

/// Summary used to focus the generation prompt for `chapter`
pub fn summary(chapter: Chapter) -> &'static str {
    lookup(chapter.number())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_chapter_has_a_summary() {
        for chapter in Chapter::all() {
            assert!(!summary(chapter).is_empty(), "chapter {} has no summary", chapter);
        }
    }

    #[test]
    fn first_and_last_chapters() {
        assert!(lookup(1).contains("Annunciation"));
        assert!(lookup(12).contains("Rich Fool"));
    }

    #[test]
    fn unknown_chapter_is_empty() {
        assert_eq!(lookup(0), "");
        assert_eq!(lookup(13), "");
        assert_eq!(lookup(u8::MAX), "");
    }
}
