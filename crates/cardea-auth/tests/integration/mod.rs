mod guard_outcomes;
mod logout;
