//! Mid-level extractors. All of them read the same immutable text and
//! `SectionSet`, fall back to the full text when their section is absent,
//! and produce best-effort output rather than failing.

pub mod contact;
pub mod dictionaries;
pub mod education;
pub mod experience;
pub mod sections;
pub mod skills;
