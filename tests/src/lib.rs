#[cfg(test)]
mod support;

#[cfg(test)]
mod discovery {
    mod integration;
}

#[cfg(test)]
mod sweep {
    mod integration;
}
