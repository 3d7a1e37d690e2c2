mod module;
mod op;
mod tree;
