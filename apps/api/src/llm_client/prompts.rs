// Cross-cutting prompt fragments shared by more than one domain module.
// Per-operation templates live in each module's own prompts.rs.

/// Appended to every prompt whose output is parsed as JSON.
/// The extraction layer scans for the first/last structural delimiter, so
/// preambles and trailing commentary from the model break it — every JSON
/// prompt must forbid them.
pub const JSON_ONLY_FOOTER: &str =
    "Return ONLY valid JSON. Do NOT include any additional commentary, \
     explanations, or markdown code fences.";

/// Multi-tier outline numbering convention used by the evidence-outline and
/// fused-outline operations. Levels 1-2 belong to the paper's section and
/// subsection headings, so generated outlines start at level 3.
pub const OUTLINE_NUMBERING_FORMAT: &str = r#"OUTLINE NUMBERING FORMAT (starting at level 3):
1. (Level 3: Numbers with periods)
  a. (Level 4: Lowercase letters with periods)
    i. (Level 5: Lowercase Roman numerals with periods)
      1) (Level 6: Numbers with parentheses)
        a) (Level 7: Lowercase letters with parentheses)
          i) (Level 8: Lowercase Roman numerals with parentheses)"#;
