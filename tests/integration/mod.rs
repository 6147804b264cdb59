mod details_flow;
mod list_flow;
mod search_flow;
