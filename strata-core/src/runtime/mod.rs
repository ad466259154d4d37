//! Strata 运行时
//!
//! 求值阶段的数据：
//! - `Object` 运行时值
//! - `Heap` 对象分配与全局绑定（编译结果中的堆快照）

pub mod heap;
pub mod object;

pub use heap::{Heap, ObjectId};
pub use object::Object;
