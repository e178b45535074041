//! # Suggestions 模块
//!
//! 只读的搜索建议桩。查询返回静态数据，写操作永远不生效。

use serde::{Deserialize, Serialize};

/// 建议行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRow {
    pub id: u64,
    pub text: String,
    pub lat: f64,
    pub lng: f64,
}

/// 查询条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionQuery {
    /// 文本过滤（不区分大小写的子串匹配），`None` 返回全部
    pub text: Option<String>,
}

impl SuggestionQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matching(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// 静态建议提供者
#[derive(Debug, Clone)]
pub struct MockSuggestionProvider {
    rows: Vec<SuggestionRow>,
}

impl Default for MockSuggestionProvider {
    fn default() -> Self {
        let row = |id, text: &str, lat, lng| SuggestionRow {
            id,
            text: text.to_string(),
            lat,
            lng,
        };
        Self {
            rows: vec![
                row(1, "Berlin", 52.5200, 13.4050),
                row(2, "Hamburg", 53.5511, 9.9937),
                row(3, "Munich", 48.1351, 11.5820),
                row(4, "Cologne", 50.9375, 6.9603),
            ],
        }
    }
}

impl MockSuggestionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询匹配的建议行
    pub fn query(&self, query: &SuggestionQuery) -> Vec<SuggestionRow> {
        let needle = query.text.as_deref().map(str::to_lowercase);
        self.rows
            .iter()
            .filter(|row| match &needle {
                Some(needle) => row.text.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// 不支持插入
    pub fn insert(&mut self, _row: SuggestionRow) -> Option<u64> {
        None
    }

    /// 不支持更新，返回受影响行数 0
    pub fn update(&mut self, _query: &SuggestionQuery, _row: SuggestionRow) -> usize {
        0
    }

    /// 不支持删除，返回受影响行数 0
    pub fn delete(&mut self, _query: &SuggestionQuery) -> usize {
        0
    }
}
