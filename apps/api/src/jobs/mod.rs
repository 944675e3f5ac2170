// Job board: post-job form validation and the hosted job/company store.
// Auth is handled by the front-end's identity provider; recruiter_id arrives in the form.

pub mod handlers;
pub mod store;
pub mod validation;
