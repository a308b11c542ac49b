use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ConfigError;

/// 单个问题（不可变）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question(String);

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 问题集合
///
/// 启动时确定，之后不再修改。每一轮通过 [`QuestionSet::shuffled`]
/// 得到新的遍历顺序，集合本身保持原样。
#[derive(Debug, Clone)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// 创建问题集合，忽略空白问题
    ///
    /// # 返回
    /// 过滤后为空时返回 `ConfigError::EmptyQuestionSet`
    pub fn new<I, S>(questions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let questions: Vec<Question> = questions
            .into_iter()
            .map(Into::<String>::into)
            .filter(|q| !q.trim().is_empty())
            .map(Question::new)
            .collect();

        if questions.is_empty() {
            return Err(ConfigError::EmptyQuestionSet);
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// 生成一个随机排列，每个问题恰好出现一次
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&Question> {
        let mut order: Vec<&Question> = self.questions.iter().collect();
        order.shuffle(rng);
        order
    }
}

/// API Key
///
/// 进程启动时提供一次，之后只读。`Debug` 输出不包含明文。
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into().trim().to_string();
        if secret.is_empty() {
            return Err(ConfigError::EmptyCredential);
        }
        Ok(Self(secret))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// 模型返回的回答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer(String);

impl Answer {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 回答长度（字符数）
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shuffled_is_permutation() {
        let set = QuestionSet::new(["Q1", "Q2", "Q3", "Q4", "Q5"]).unwrap();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let order = set.shuffled(&mut rng);
            assert_eq!(order.len(), set.len());

            let mut texts: Vec<&str> = order.iter().map(|q| q.text()).collect();
            texts.sort_unstable();
            assert_eq!(texts, vec!["Q1", "Q2", "Q3", "Q4", "Q5"]);
        }
    }

    #[test]
    fn test_shuffled_leaves_set_untouched() {
        let set = QuestionSet::new(["a", "b", "c"]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let _ = set.shuffled(&mut rng);

        let texts: Vec<&str> = set.iter().map(|q| q.text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_blank_questions_are_dropped() {
        let set = QuestionSet::new(["Q1", "  ", "", "Q2"]).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let result = QuestionSet::new(Vec::<String>::new());
        assert!(matches!(result, Err(ConfigError::EmptyQuestionSet)));
    }

    #[test]
    fn test_credential_is_trimmed_and_hidden() {
        let credential = Credential::new("  sk-secret\n").unwrap();
        assert_eq!(credential.expose(), "sk-secret");
        assert!(!format!("{:?}", credential).contains("sk-secret"));
        assert!(matches!(
            Credential::new("   "),
            Err(ConfigError::EmptyCredential)
        ));
    }

    #[test]
    fn test_answer_counts_chars() {
        assert_eq!(Answer::new("你好abc").char_count(), 5);
    }
}
