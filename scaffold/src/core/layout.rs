//! Built-in project layout applied when no manifest is given.

use crate::core::entry::PathEntry;

/// Entries of the default layout, in creation order.
pub const DEFAULT_LAYOUT: &[&str] = &[
    "configs/project_config.yml",
    "configs/tools_config.yml",
    "data/unstructed_docs/stories",
    "data/unstructed_docs/swiss_airline_policy",
    "Notebooks/Tools/RAG_tool/rag_tool.ipynb",
    "Notebooks/Tools/sql_agents/sql_agent_chain_for_large_db.ipynb",
    "Notebooks/Tools/sql_agents/sql_agent_chain_steps.ipynb",
    "Notebooks/Tools/sql_agents/sql_agent_steps.ipynb",
    "Notebooks/Tools/tavily/tavily_search.ipynb",
    "Notebooks/custom_agent/openai_function_calling.ipynb",
    "Notebooks/explore_databases/explore_chinook.ipynb",
    "Notebooks/explore_databases/explore_traveldb.ipynb",
    "Notebooks/python_tip_automatic_docstring/automatic_docstring.ipynb",
    "Notebooks/test_gpt_models/gpt-4o.ipynb",
    "Notebooks/test_gpt_models/gpt.ipynb",
    "Notebooks/full_graph.ipynb",
    "images",
    "memory",
    "src/agent_graph",
    "src/chatbot",
    "src/utils",
    "src/app.py",
    "src/prepare_vector_db.py",
    "requirements.txt",
];

pub fn default_entries() -> Vec<PathEntry> {
    DEFAULT_LAYOUT.iter().copied().map(PathEntry::from).collect()
}
