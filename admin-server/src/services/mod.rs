//! 服务层 - 管理端业务服务
//!
//! # 服务列表
//!
//! - [`EmployeeService`] - 员工管理与登录凭证校验

pub mod employee;

pub use employee::EmployeeService;
