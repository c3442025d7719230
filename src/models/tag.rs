//! # 태그 모델 정의
//!
//! 태그는 게시글을 분류하고 검색하기 위한 라벨입니다.
//! 이름은 유일하고, 한 번 만들어지면 바뀌지 않습니다.

use serde::Serialize;

/// `GET /tags` 응답 한 줄: `tags` 테이블 한 행과 붙어 있는 게시글 수
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TagSummary {
    pub id: i64,
    pub name: String,
    pub board_count: i64,
}

/// 요청에 담긴 태그 이름을 정리합니다.
///
/// 앞뒤 공백 제거, 빈 이름 제외, 중복 제거(처음 나온 순서 유지).
/// 대소문자는 그대로 둡니다: 검색은 대소문자를 구분합니다.
pub fn normalize_tag_names(names: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if name.is_empty() || result.iter().any(|existing| existing == name) {
            continue;
        }
        result.push(name.to_string());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_deduplicates() {
        let names = vec![
            " rust ".to_string(),
            "".to_string(),
            "rust".to_string(),
            "Rust".to_string(),
            "axum".to_string(),
        ];
        assert_eq!(normalize_tag_names(&names), vec!["rust", "Rust", "axum"]);
    }
}
