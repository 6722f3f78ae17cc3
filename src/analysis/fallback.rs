// src/analysis/fallback.rs
//! Placeholder result set shown when real analysis results are
//! unavailable. Fixed content so the ranking surface always has five
//! plausible rows to render.

use crate::types::candidate::CandidateView;

/// The five placeholder candidates, ordered by descending match score.
pub fn fallback_candidates() -> Vec<CandidateView> {
    let mut jean = placeholder(
        "Jean Dupont",
        "jean.dupont@example.com",
        "+33 6 12 34 56 78",
        95,
        5,
        "Profil idéal avec 5 ans d'expérience en développement web et une expertise solide en Angular et Spring Boot.",
        &["Angular", "Spring Boot", "Java", "TypeScript", "RESTful APIs"],
        &[
            "Décrivez un projet complexe où vous avez utilisé Angular et Spring Boot ensemble.",
            "Comment gériez-vous les problèmes de performance dans vos applications?",
            "Quelle est votre approche pour assurer la qualité du code?",
        ],
    );
    jean.experience = Some(
        "Développeur Full Stack chez TechSolutions (2019-2023)\n\
         Développeur Front-end chez WebAgency (2017-2019)"
            .to_string(),
    );
    jean.education = Some("Master en Informatique - Université de Paris (2017)".to_string());
    jean.languages = Some(vec![
        "Français (natif)".to_string(),
        "Anglais (courant)".to_string(),
    ]);

    vec![
        jean,
        placeholder(
            "Marie Martin",
            "marie.martin@example.com",
            "+33 7 98 76 54 32",
            87,
            4,
            "Bonnes compétences techniques mais expérience limitée dans le secteur spécifique demandé.",
            &["React", "Node.js", "JavaScript", "MongoDB"],
            &[
                "Comment pouvez-vous appliquer votre expérience React à des projets Angular?",
                "Parlez-moi de votre expérience avec les bases de données SQL.",
            ],
        ),
        placeholder(
            "Ahmed Bennani",
            "ahmed.bennani@example.com",
            "+33 6 45 67 89 01",
            82,
            4,
            "Développeur full-stack avec une solide formation et des projets pertinents, mais manque d'expérience professionnelle.",
            &["JavaScript", "Vue.js", "Spring", "Docker"],
            &[
                "Comment compensez-vous votre manque d'expérience professionnelle?",
                "Décrivez un projet personnel qui démontre vos capacités techniques.",
            ],
        ),
        placeholder(
            "Sophie Lefebvre",
            "sophie.lefebvre@example.com",
            "+33 6 23 45 67 89",
            76,
            3,
            "Compétences techniques adéquates mais profil plus orienté vers le design que le développement.",
            &["UI/UX Design", "CSS", "HTML", "Sketch", "Figma"],
            &[
                "Comment collaborez-vous avec les développeurs dans vos projets?",
                "Quelle est votre expérience avec le développement front-end?",
            ],
        ),
        placeholder(
            "Pierre Moreau",
            "pierre.moreau@example.com",
            "+33 7 12 34 56 78",
            72,
            3,
            "Expérience solide mais compétences techniques qui ne correspondent pas parfaitement au poste.",
            &["C#", ".NET", "SQL Server", "Azure"],
            &[
                "Quelle est votre expérience avec les frameworks JavaScript?",
                "Comment envisagez-vous votre transition vers les technologies demandées?",
            ],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn placeholder(
    name: &str,
    email: &str,
    phone: &str,
    match_score: i32,
    rating: i32,
    summary: &str,
    strengths: &[&str],
    questions: &[&str],
) -> CandidateView {
    CandidateView {
        candidate_name: name.to_string(),
        match_score,
        summary: summary.to_string(),
        rating,
        strengths: strengths.iter().map(|s| s.to_string()).collect(),
        weaknesses: Vec::new(),
        suggested_questions: questions.iter().map(|q| q.to_string()).collect(),
        skills: None,
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        download_id: None,
        experience: None,
        education: None,
        languages: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_has_five_candidates_in_score_order() {
        let candidates = fallback_candidates();
        assert_eq!(candidates.len(), 5);

        let scores: Vec<i32> = candidates.iter().map(|c| c.match_score).collect();
        assert_eq!(scores, vec![95, 87, 82, 76, 72]);

        let mut sorted = scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn fixture_top_candidate_is_fully_filled() {
        let candidates = fallback_candidates();
        let jean = &candidates[0];

        assert_eq!(jean.candidate_name, "Jean Dupont");
        assert_eq!(jean.rating, 5);
        assert_eq!(jean.email.as_deref(), Some("jean.dupont@example.com"));
        assert!(jean.experience.as_deref().unwrap().contains("TechSolutions"));
        assert!(jean.education.as_deref().unwrap().contains("Master"));
        assert_eq!(jean.languages.as_ref().unwrap().len(), 2);
        assert_eq!(jean.suggested_questions.len(), 3);
    }

    #[test]
    fn fixture_rows_carry_contact_but_no_download_link() {
        for candidate in fallback_candidates() {
            assert!(candidate.email.is_some());
            assert!(candidate.phone.is_some());
            assert!(candidate.download_id.is_none());
            assert!(candidate.weaknesses.is_empty());
            assert!(!candidate.strengths.is_empty());
        }
    }
}
