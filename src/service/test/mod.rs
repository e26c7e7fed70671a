mod afk;
mod membership;
