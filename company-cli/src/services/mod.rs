// Business logic services layer
//
// Entry points that combine authorization, the store and the import
// pipeline, plus employee maintenance. The CLI handlers call these; nothing here prints.

pub mod employees;
pub mod hours;

pub use employees::{
    EMPLOYEE_ADDED, EMPLOYEE_DELETED, EMPLOYEE_UPDATED, EditEmployeeForm, NewEmployeeForm,
    create_employee, edit_employee, remove_employee,
};
pub use hours::{HOURS_RECORDED, Upload, import_project_hours, record_hours};
