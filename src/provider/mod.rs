pub use self::{
    graphql::Subgraph,
    history::{fetch_history, Timestamped},
};

mod graphql;
mod history;
