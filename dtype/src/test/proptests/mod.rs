
#[cfg(test)]
mod dtype_props;
