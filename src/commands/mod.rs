mod generate;
pub use generate::generate;

mod featured;
pub use featured::featured;

mod project;
pub use project::project;

mod user_projects;
pub use user_projects::user_projects;
