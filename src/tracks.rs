//! Static track metadata. Immutable per-track skills/roles/tags plus the
//! interview system prompt, keyed by the internship track enum.

use crate::entities::sea_orm_active_enums::TrackEnum;

pub struct TrackInfo {
    pub name: &'static str,
    pub skills: &'static [&'static str],
    pub roles: &'static [&'static str],
    pub tags: &'static [&'static str],
    pub interview_prompt: &'static str,
}

static FULL_STACK: TrackInfo = TrackInfo {
    name: "Full Stack Development",
    skills: &[
        "HTML/CSS",
        "JavaScript",
        "React",
        "Node.js",
        "REST APIs",
        "SQL",
        "Git",
    ],
    roles: &[
        "Frontend Developer",
        "Backend Developer",
        "Full Stack Engineer",
    ],
    tags: &["web", "javascript", "react", "node"],
    interview_prompt: "You are a technical interviewer for a full stack development internship. \
        Ask one question at a time about HTML/CSS, JavaScript, React, Node.js, REST APIs and SQL, \
        starting easy and increasing difficulty. After five questions, call the \
        submit_interview_result function with a score out of 100 and whether the candidate passed.",
};

static AI_ML: TrackInfo = TrackInfo {
    name: "AI & Machine Learning",
    skills: &[
        "Python",
        "NumPy/Pandas",
        "scikit-learn",
        "Deep Learning",
        "Model Evaluation",
        "Data Preprocessing",
    ],
    roles: &["ML Engineer", "Data Scientist", "AI Engineer"],
    tags: &["ai", "ml", "python", "data"],
    interview_prompt: "You are a technical interviewer for an AI/ML internship. \
        Ask one question at a time about Python, classical machine learning, neural networks and \
        model evaluation, starting easy and increasing difficulty. After five questions, call the \
        submit_interview_result function with a score out of 100 and whether the candidate passed.",
};

static WEB3: TrackInfo = TrackInfo {
    name: "Web3 Development",
    skills: &[
        "Solidity",
        "Smart Contracts",
        "Ethereum",
        "Web3.js",
        "DeFi Concepts",
        "Wallet Integration",
    ],
    roles: &["Smart Contract Developer", "Blockchain Engineer"],
    tags: &["web3", "blockchain", "solidity", "ethereum"],
    interview_prompt: "You are a technical interviewer for a Web3 development internship. \
        Ask one question at a time about Solidity, smart contract security, Ethereum and dApp \
        integration, starting easy and increasing difficulty. After five questions, call the \
        submit_interview_result function with a score out of 100 and whether the candidate passed.",
};

pub fn track_info(track: &TrackEnum) -> &'static TrackInfo {
    match track {
        TrackEnum::FullStack => &FULL_STACK,
        TrackEnum::AiMl => &AI_ML,
        TrackEnum::Web3 => &WEB3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn every_track_has_metadata() {
        for track in TrackEnum::iter() {
            let info = track_info(&track);
            assert!(!info.name.is_empty());
            assert!(!info.skills.is_empty());
            assert!(!info.roles.is_empty());
            assert!(!info.tags.is_empty());
            assert!(info.interview_prompt.contains("submit_interview_result"));
        }
    }
}
