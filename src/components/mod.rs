//! UI Components
//!
//! Pages per department plus the shared widgets they use.

mod delete_confirm_button;
mod error_banner;
mod toast_container;
mod nav_bar;
mod landing_page;
mod login_page;
mod department_selector;
mod operations_page;
mod operations_dashboard;
mod inventory_list;
mod new_item_form;
mod phases_overview;
mod phase_actions;
mod operations_reports;
mod item_detail_page;
mod transfer_dialog;
mod procurement_page;
mod stock_list;
mod suppliers_page;
mod supplier_form;
mod purchase_orders_page;
mod purchase_order_form;
mod finance_page;
mod employee_logs_page;
mod engineering_page;
mod employee_dashboard;
mod diagnostics_page;

pub use delete_confirm_button::DeleteConfirmButton;
pub use error_banner::ErrorBanner;
pub use toast_container::ToastContainer;
pub use nav_bar::NavBar;
pub use landing_page::LandingPage;
pub use login_page::LoginPage;
pub use department_selector::DepartmentSelector;
pub use operations_page::OperationsPage;
pub use operations_dashboard::OperationsDashboard;
pub use inventory_list::InventoryList;
pub use new_item_form::NewItemForm;
pub use phases_overview::PhasesOverview;
pub use phase_actions::PhaseActions;
pub use operations_reports::OperationsReports;
pub use item_detail_page::ItemDetailPage;
pub use transfer_dialog::TransferDialog;
pub use procurement_page::ProcurementPage;
pub use stock_list::StockList;
pub use suppliers_page::SuppliersPage;
pub use supplier_form::SupplierForm;
pub use purchase_orders_page::PurchaseOrdersPage;
pub use purchase_order_form::PurchaseOrderForm;
pub use finance_page::FinancePage;
pub use employee_logs_page::EmployeeLogsPage;
pub use engineering_page::EngineeringPage;
pub use employee_dashboard::EmployeeDashboard;
pub use diagnostics_page::DiagnosticsPage;
