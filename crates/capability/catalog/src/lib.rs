//! 类别/子类别/单元关联模型。
//!
//! 候选规则：单元的 standardCategoryId 与类别一致才可归入其
//! 子类别，唯一例外是源头类别（SOURCE_CATEGORY）同时接纳虚拟
//! 单元（VIRTUAL_CATEGORY）——派生单元可以归档在源头类别之下。
//!
//! 提交是全量替换语义：发送子类别的完整成员列表，从不发差量。

use std::collections::BTreeSet;

use console_backend::{AssignmentApi, BackendError, CategoryRecord, SubCategoryRecord};
use domain::{StandardCategory, Unit, ViewerContext};

/// 单元是否可归入给定标准类别的子类别。
pub fn unit_is_eligible(category: StandardCategory, unit: &Unit) -> bool {
    unit.standard_category == category
        || (category == StandardCategory::Source
            && unit.standard_category == StandardCategory::Virtual)
}

/// 过滤某类别的候选单元，保持输入顺序。
pub fn eligible_units<'a>(category: &CategoryRecord, all_units: &'a [Unit]) -> Vec<&'a Unit> {
    all_units
        .iter()
        .filter(|unit| unit_is_eligible(category.standard_category, unit))
        .collect()
}

/// 单个子类别成员集合的编辑器。
///
/// 集合无重复、无序；include/exclude 均幂等。
pub struct AssignmentEditor {
    category_id: String,
    sub_category_id: String,
    unit_ids: BTreeSet<String>,
    submitting: bool,
}

impl AssignmentEditor {
    /// 从快照里的子类别初始化草稿。
    pub fn from_sub_category(category: &CategoryRecord, sub_category: &SubCategoryRecord) -> Self {
        Self {
            category_id: category.category_id.clone(),
            sub_category_id: sub_category.sub_category_id.clone(),
            unit_ids: sub_category.unit_ids.clone(),
            submitting: false,
        }
    }

    /// 勾选/取消一个单元；重复操作是 no-op。
    pub fn toggle(&mut self, unit_id: &str, included: bool) {
        if included {
            self.unit_ids.insert(unit_id.to_string());
        } else {
            self.unit_ids.remove(unit_id);
        }
    }

    /// 当前草稿成员集合。
    pub fn unit_ids(&self) -> &BTreeSet<String> {
        &self.unit_ids
    }

    /// 是否有提交在途。
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// 提交完整成员列表。
    ///
    /// 返回 Ok(false) 表示已有提交在途、本次被忽略（同一表单实例
    /// 最多一个在途变更）。失败时草稿原样保留，由操作者重试。
    pub async fn commit(
        &mut self,
        ctx: &ViewerContext,
        industry_id: &str,
        client: &dyn AssignmentApi,
    ) -> Result<bool, BackendError> {
        if self.submitting {
            tracing::debug!(sub_category_id = %self.sub_category_id, "commit ignored: already in flight");
            return Ok(false);
        }
        self.submitting = true;
        let result = client
            .replace_assignment(
                ctx,
                industry_id,
                &self.category_id,
                &self.sub_category_id,
                self.unit_ids.iter().cloned().collect(),
            )
            .await;
        self.submitting = false;
        result.map(|_| true)
    }
}
