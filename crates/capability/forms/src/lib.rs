//! 单元表单控制器
//!
//! 针对单个单元草稿的状态机：VIEW（全字段禁用）与 EDIT（按
//! 查看者档位与类别 schema 决定可编辑性）。只读判定在载入时
//! 一次性收拢为 [`EditScope`]——只读的单一事实来源：ReadOnly
//! 范围的控制器永远停留在 VIEW，提交入口不可达，逐字段禁用
//! 只是它的投影。
//!
//! 提交失败时草稿原样保留（不回滚到编辑前快照），操作者可以
//! 直接重试；失败以单一通用信号上报，没有字段级错误，这是
//! 已知限制而非待修缺陷。

mod controller;

pub use controller::{EditScope, FieldInput, FormMode, UnitFormController};
