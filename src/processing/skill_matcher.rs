//! Skill match scoring between a candidate's skills and a job's required skills

use serde::{Deserialize, Serialize};

/// Suffixes stripped from or appended to a skill when building fuzzy variants.
const JS_SUFFIXES: [&str; 2] = [".js", "js"];

/// Credits and volume-bonus parameters used by [`SkillMatchScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Credit for a job skill found verbatim in the candidate pool
    pub exact_weight: f64,
    /// Credit for a job skill matched only through suffix variants / substrings
    pub fuzzy_weight: f64,
    /// Upper bound on candidate/job skill-count ratio
    pub max_volume_ratio: f64,
    /// Percentage points per unit of ratio above (or below) 1.0
    pub volume_bonus_factor: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_weight: 1.0,
            fuzzy_weight: 0.8,
            max_volume_ratio: 1.5,
            volume_bonus_factor: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    Exact,
    Fuzzy,
    Missing,
}

/// Outcome for a single required job skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub job_skill: String,
    pub kind: MatchKind,
    /// Candidate skill (as given) that earned the credit
    pub matched_by: Option<String>,
    pub credit: f64,
}

/// Full explanation of a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchBreakdown {
    pub percentage: u8,
    pub matched_credit: f64,
    pub total_required: usize,
    pub candidate_count: usize,
    pub base_score: f64,
    pub volume_bonus: f64,
    pub matches: Vec<SkillMatch>,
}

impl SkillMatchBreakdown {
    fn empty(candidate_count: usize, job_skills: &[impl AsRef<str>]) -> Self {
        Self {
            percentage: 0,
            matched_credit: 0.0,
            total_required: job_skills.len(),
            candidate_count,
            base_score: 0.0,
            volume_bonus: 0.0,
            matches: job_skills
                .iter()
                .map(|s| SkillMatch {
                    job_skill: s.as_ref().to_string(),
                    kind: MatchKind::Missing,
                    matched_by: None,
                    credit: 0.0,
                })
                .collect(),
        }
    }

    /// Job skills that earned any credit
    pub fn skills_matched(&self) -> Vec<&str> {
        self.matches
            .iter()
            .filter(|m| m.kind != MatchKind::Missing)
            .map(|m| m.job_skill.as_str())
            .collect()
    }

    /// Job skills the candidate does not cover
    pub fn skills_missing(&self) -> Vec<&str> {
        self.matches
            .iter()
            .filter(|m| m.kind == MatchKind::Missing)
            .map(|m| m.job_skill.as_str())
            .collect()
    }

    pub fn count_of(&self, kind: MatchKind) -> usize {
        self.matches.iter().filter(|m| m.kind == kind).count()
    }
}

/// Scores how well a candidate's skill list covers a job's required skills.
///
/// Each job skill earns the exact credit when it appears verbatim (after
/// normalization) among the candidate's skills, otherwise the fuzzy credit
/// when any `.js`/`js` suffix variant of a candidate skill and of the job
/// skill contain one another. The base percentage is the summed credit over
/// the number of job skills; a volume bonus derived from the candidate/job
/// skill-count ratio is then added and the result clamped to `0..=100`.
///
/// The scorer holds no state besides its weights and is safe to share
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkillMatchScorer {
    weights: ScoringWeights,
}

impl SkillMatchScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Match percentage in `0..=100`
    pub fn score<C, J>(&self, candidate_skills: &[C], job_skills: &[J]) -> u8
    where
        C: AsRef<str>,
        J: AsRef<str>,
    {
        self.explain(candidate_skills, job_skills).percentage
    }

    /// Same as [`score`](Self::score), treating an absent list as empty
    pub fn score_optional<C, J>(&self, candidate_skills: Option<&[C]>, job_skills: Option<&[J]>) -> u8
    where
        C: AsRef<str>,
        J: AsRef<str>,
    {
        match (candidate_skills, job_skills) {
            (Some(candidate), Some(job)) => self.score(candidate, job),
            _ => 0,
        }
    }

    /// Score together with the per-skill reasoning behind it
    pub fn explain<C, J>(&self, candidate_skills: &[C], job_skills: &[J]) -> SkillMatchBreakdown
    where
        C: AsRef<str>,
        J: AsRef<str>,
    {
        let candidate_count = candidate_skills.len();
        if candidate_skills.is_empty() || job_skills.is_empty() {
            return SkillMatchBreakdown::empty(candidate_count, job_skills);
        }

        let pool: Vec<(String, &str)> = candidate_skills
            .iter()
            .map(|s| (normalize(s.as_ref()), s.as_ref()))
            .collect();

        let matches: Vec<SkillMatch> = job_skills
            .iter()
            .map(|job_skill| self.match_job_skill(job_skill.as_ref(), &pool))
            .collect();

        let total_required = job_skills.len();
        let matched_credit: f64 = matches.iter().map(|m| m.credit).sum();
        let base_score = matched_credit / total_required as f64 * 100.0;

        let ratio = (candidate_count as f64 / total_required as f64).min(self.weights.max_volume_ratio);
        let volume_bonus = (ratio - 1.0) * self.weights.volume_bonus_factor;

        let final_score = (base_score + volume_bonus).min(100.0).max(0.0);

        SkillMatchBreakdown {
            // Half away from zero; final_score is already within 0..=100
            percentage: final_score.round() as u8,
            matched_credit,
            total_required,
            candidate_count,
            base_score,
            volume_bonus,
            matches,
        }
    }

    fn match_job_skill(&self, job_skill: &str, pool: &[(String, &str)]) -> SkillMatch {
        let normalized = normalize(job_skill);
        let missing = SkillMatch {
            job_skill: job_skill.to_string(),
            kind: MatchKind::Missing,
            matched_by: None,
            credit: 0.0,
        };

        if normalized.is_empty() {
            return missing;
        }

        if let Some((_, original)) = pool.iter().find(|(candidate, _)| *candidate == normalized) {
            return SkillMatch {
                kind: MatchKind::Exact,
                matched_by: Some(original.to_string()),
                credit: self.weights.exact_weight,
                ..missing
            };
        }

        let job_variants = skill_variants(&normalized);
        let fuzzy = pool
            .iter()
            .filter(|(candidate, _)| !candidate.is_empty())
            .find(|(candidate, _)| variants_overlap(&skill_variants(candidate), &job_variants));

        match fuzzy {
            Some((_, original)) => SkillMatch {
                kind: MatchKind::Fuzzy,
                matched_by: Some(original.to_string()),
                credit: self.weights.fuzzy_weight,
                ..missing
            },
            None => missing,
        }
    }
}

/// Score with the default weights
pub fn score<C: AsRef<str>, J: AsRef<str>>(candidate_skills: &[C], job_skills: &[J]) -> u8 {
    SkillMatchScorer::new().score(candidate_skills, job_skills)
}

/// Score with the default weights, treating an absent list as empty
pub fn score_optional<C: AsRef<str>, J: AsRef<str>>(
    candidate_skills: Option<&[C]>,
    job_skills: Option<&[J]>,
) -> u8 {
    SkillMatchScorer::new().score_optional(candidate_skills, job_skills)
}

/// Lower-case and trim a skill
pub fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Surface variants of a normalized skill: itself, with a trailing `.js` or
/// `js` removed, and with `.js` or `js` appended. Empty variants are dropped.
pub fn skill_variants(skill: &str) -> Vec<String> {
    let mut variants = vec![skill.to_string()];

    for suffix in JS_SUFFIXES {
        if let Some(stripped) = skill.strip_suffix(suffix) {
            variants.push(stripped.to_string());
        }
    }
    for suffix in JS_SUFFIXES {
        variants.push(format!("{}{}", skill, suffix));
    }

    variants.retain(|v| !v.is_empty());
    variants.dedup();
    variants
}

fn variants_overlap(candidate_variants: &[String], job_variants: &[String]) -> bool {
    candidate_variants.iter().any(|cv| {
        job_variants
            .iter()
            .any(|jv| jv.contains(cv.as_str()) || cv.contains(jv.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_empty_lists_score_zero() {
        assert_eq!(score(&NONE, &["React"]), 0);
        assert_eq!(score(&["React"], &NONE), 0);
        assert_eq!(score(&NONE, &NONE), 0);
        assert_eq!(score_optional::<&str, &str>(None, Some(&["React"][..])), 0);
        assert_eq!(score_optional::<&str, &str>(Some(&["React"][..]), None), 0);
    }

    #[test]
    fn test_single_exact_match() {
        assert_eq!(score(&["React"], &["React"]), 100);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(score(&["REACT"], &["react"]), score(&["react"], &["react"]));
        assert_eq!(score(&["  Docker "], &["docker"]), 100);
    }

    #[test]
    fn test_fuzzy_suffix_match_uses_fuzzy_weight() {
        assert_eq!(score(&["React"], &["React.js"]), 80);
        assert_eq!(score(&["Node.js"], &["Node"]), 80);
        assert_eq!(score(&["ReactJS"], &["React"]), 80);
    }

    #[test]
    fn test_substring_match_is_fuzzy() {
        let breakdown = SkillMatchScorer::new().explain(&["React"], &["React Native"]);
        assert_eq!(breakdown.matches[0].kind, MatchKind::Fuzzy);
        assert_eq!(breakdown.percentage, 80);
    }

    #[test]
    fn test_no_double_credit_per_job_skill() {
        let breakdown = SkillMatchScorer::new().explain(&["React", "ReactJS"], &["React"]);
        assert_eq!(breakdown.matched_credit, 1.0);
        assert_eq!(breakdown.matches[0].matched_by.as_deref(), Some("React"));
        // ratio capped at 1.5 -> +5, clamped back to 100
        assert_eq!(breakdown.percentage, 100);
    }

    #[test]
    fn test_first_fuzzy_candidate_wins() {
        let breakdown = SkillMatchScorer::new().explain(&["Node", "NodeJS"], &["Node.js"]);
        assert_eq!(breakdown.matches[0].kind, MatchKind::Fuzzy);
        assert_eq!(breakdown.matches[0].matched_by.as_deref(), Some("Node"));
        assert!((breakdown.matched_credit - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_denominator_is_job_skill_count() {
        // 1 of 10 matched, 1 candidate skill: base 10, ratio 0.1 -> bonus -9
        let job: Vec<String> = (0..10).map(|i| format!("skill{}", i)).collect();
        let breakdown = SkillMatchScorer::new().explain(&["skill0"], &job);
        assert!((breakdown.base_score - 10.0).abs() < 1e-9);
        assert!((breakdown.volume_bonus + 9.0).abs() < 1e-9);
        assert_eq!(breakdown.percentage, 1);
    }

    #[test]
    fn test_volume_bonus_rewards_more_candidate_skills() {
        let job = ["Python", "Docker"];
        let few = ["Python", "Docker"];
        let many = [
            "Python", "Docker", "Figma", "Sketch", "Kotlin", "Swift", "Ruby", "Perl", "Haskell", "Elixir",
        ];
        assert!(score(&many, &job) >= score(&few, &job));

        let partial_few = ["Python", "Figma"];
        let partial_many = ["Python", "Figma", "Sketch", "Kotlin"];
        // 50 base, ratio 1.0 vs capped 1.5
        assert_eq!(score(&partial_few, &job), 50);
        assert_eq!(score(&partial_many, &job), 55);
    }

    #[test]
    fn test_under_supply_is_penalized() {
        let job = ["Python", "Docker", "Kubernetes", "Terraform"];
        // 1 exact match each; ratio 0.25 vs 1.0
        let short = ["Python"];
        let full = ["Python", "Figma", "Sketch", "Swift"];
        assert_eq!(score(&short, &job), 18);
        assert_eq!(score(&full, &job), 25);
        assert!(score(&short, &job) <= score(&full, &job));
    }

    #[test]
    fn test_final_score_never_negative() {
        let job: Vec<String> = (0..20).map(|i| format!("tool{}", i)).collect();
        assert_eq!(score(&["Figma"], &job), 0);
    }

    #[test]
    fn test_rounding_ties_round_up() {
        // base 25 + bonus 2.5 = 27.5
        let candidate = ["Rust", "Scala", "Kotlin", "Haskell", "Elixir"];
        let job = ["Rust", "Terraform", "Figma", "Sketch"];
        let breakdown = SkillMatchScorer::new().explain(&candidate, &job);
        assert!((breakdown.base_score + breakdown.volume_bonus - 27.5).abs() < 1e-9);
        assert_eq!(breakdown.percentage, 28);
    }

    #[test]
    fn test_score_is_deterministic() {
        let candidate = ["JavaScript", "React", "Node.js", "AWS"];
        let job = ["React", "Node", "TypeScript", "Docker", "AWS"];
        assert_eq!(score(&candidate, &job), score(&candidate, &job));
    }

    #[test]
    fn test_score_always_within_bounds() {
        let lists: Vec<Vec<&str>> = vec![
            vec!["js"],
            vec!["React", "react", "REACT"],
            vec!["", "   "],
            vec!["Node.js", "Express", "Mongo"],
            vec!["a", "b", "c", "d", "e", "f", "g", "h"],
        ];
        for candidate in &lists {
            for job in &lists {
                let s = score(candidate, job);
                assert!(s <= 100, "{:?} vs {:?} scored {}", candidate, job, s);
            }
        }
    }

    #[test]
    fn test_blank_skills_never_match() {
        let breakdown = SkillMatchScorer::new().explain(&["   "], &["Rust"]);
        assert_eq!(breakdown.matches[0].kind, MatchKind::Missing);

        let breakdown = SkillMatchScorer::new().explain(&["Node.js"], &[" "]);
        assert_eq!(breakdown.matches[0].kind, MatchKind::Missing);
        assert_eq!(breakdown.percentage, 0);
    }

    // Empty variants are dropped: "" would be a substring of every skill.
    #[test]
    fn test_skill_variants() {
        assert_eq!(
            skill_variants("react"),
            vec!["react", "react.js", "reactjs"]
        );
        assert_eq!(
            skill_variants("node.js"),
            vec!["node.js", "node", "node.", "node.js.js", "node.jsjs"]
        );
        assert_eq!(skill_variants("js"), vec!["js", "js.js", "jsjs"]);
        assert_eq!(skill_variants(".js"), vec![".js", ".", ".js.js", ".jsjs"]);
    }

    #[test]
    fn test_bare_js_matches_through_appended_suffix() {
        // "docker.js" contains "js"; the match comes from the appended
        // variant, not from an empty one
        let breakdown = SkillMatchScorer::new().explain(&["JS"], &["Docker"]);
        assert_eq!(breakdown.matches[0].kind, MatchKind::Fuzzy);
        assert_eq!(breakdown.percentage, 80);
        assert_eq!(score(&["Docker"], &["Rust"]), 0);
    }

    #[test]
    fn test_skills_matched_and_missing() {
        let breakdown = SkillMatchScorer::new().explain(
            &["React", "Python"],
            &["React", "Node.js", "Python", "AWS"],
        );
        assert_eq!(breakdown.skills_matched(), vec!["React", "Python"]);
        assert_eq!(breakdown.skills_missing(), vec!["Node.js", "AWS"]);
        assert_eq!(breakdown.count_of(MatchKind::Exact), 2);
    }

    #[test]
    fn test_custom_weights() {
        let scorer = SkillMatchScorer::with_weights(ScoringWeights {
            fuzzy_weight: 0.5,
            ..ScoringWeights::default()
        });
        assert_eq!(scorer.score(&["React"], &["React.js"]), 50);
    }
}
