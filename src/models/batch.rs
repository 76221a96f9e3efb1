use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// 单个对象或对象数组（批量创建）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn is_many(&self) -> bool {
        matches!(self, OneOrMany::Many(_))
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }

    /// 按原请求的形状包装结果：单个请求返回单个对象
    pub fn reshape(many: bool, mut items: Vec<T>) -> Option<Self> {
        if many {
            Some(OneOrMany::Many(items))
        } else {
            items.pop().map(OneOrMany::One)
        }
    }
}

impl<T: Validate> Validate for OneOrMany<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            OneOrMany::One(item) => item.validate(),
            OneOrMany::Many(items) => {
                if items.is_empty() {
                    let mut error = ValidationError::new("min_items");
                    error.message = Some(Cow::from("\"value\" must contain at least 1 items"));
                    let mut errors = ValidationErrors::new();
                    errors.add("value", error);
                    return Err(errors);
                }
                items.iter().try_for_each(Validate::validate)
            }
        }
    }
}
