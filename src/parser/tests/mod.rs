mod expressions;
mod predicates;
