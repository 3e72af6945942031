mod test_commands;
